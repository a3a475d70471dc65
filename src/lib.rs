pub mod config;
pub mod dsp;
pub mod error;
pub mod io; // Clock sources

pub use config::FilterConfig;
pub use dsp::{Approximation, FilterKind, OnePole};
pub use error::FilterError;
pub use io::{Clock, ManualClock, MonotonicClock};
