//! Benchmarks for the filter primitives.

mod coefficient;
mod filter;

pub use coefficient::bench_coefficient;
pub use filter::bench_filter;
