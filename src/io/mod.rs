// Purpose - external interfaces: where timestamps come from

pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};
