//! Single-pole filter math.
//!
//! Allocation-free and realtime-safe: an update is a handful of float
//! operations plus, at most, one `exp()`. Filters are plain owned values, so
//! embed them directly in whatever struct owns the signal channel.

/// Decay-weight policies (exact, linear, ratio-gated hybrid).
pub mod coefficient;
/// Timestamped low-pass, high-pass, integrator and differentiator.
pub mod filter;

pub use coefficient::Approximation;
pub use filter::{FilterKind, OnePole};
