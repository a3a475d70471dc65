use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;

/*
Timestamps
==========

Filters never read a hardware timer directly. Whoever owns a filter hands it
a `Clock`: a zero-argument source of monotonically non-decreasing
microsecond counts. The count is a u32, so on real hardware it wraps every
2^32 µs (~71.6 minutes). Elapsed time is always taken with wrapping
subtraction, which gives the right answer across a single wrap:

    last = 0xFFFF_FF00, now = 0x0000_0100  →  now − last = 0x200 µs

A clock that runs backwards (rather than wrapping) is a caller bug; it shows
up as one very long timestep.
*/

/// Source of microsecond timestamps.
pub trait Clock {
    /// Current time in microseconds. Wraps at `u32::MAX`.
    fn micros(&self) -> u32;
}

impl<F> Clock for F
where
    F: Fn() -> u32,
{
    #[inline]
    fn micros(&self) -> u32 {
        self()
    }
}

/// Host clock backed by [`Instant`], truncated to 32 bits so it wraps the same
/// way an embedded microsecond counter does.
///
/// Copies share the same origin, so a sensor thread and the thread running
/// the filters can each hold one and agree on timestamps.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn micros(&self) -> u32 {
        // Truncation is the wraparound.
        self.origin.elapsed().as_micros() as u32
    }
}

/// Hand-driven clock for tests, benches and simulations.
///
/// Clones are handles onto the same counter.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU32>,
}

impl ManualClock {
    pub fn new(start: u32) -> Self {
        Self {
            now: Arc::new(AtomicU32::new(start)),
        }
    }

    pub fn set(&self, micros: u32) {
        self.now.store(micros, Ordering::Relaxed);
    }

    /// Moves the clock forward, wrapping at `u32::MAX`. Returns the new time.
    pub fn advance(&self, delta_micros: u32) -> u32 {
        self.now
            .fetch_add(delta_micros, Ordering::Relaxed)
            .wrapping_add(delta_micros)
    }
}

impl Clock for ManualClock {
    #[inline]
    fn micros(&self) -> u32 {
        self.now.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_closure_is_a_clock() {
        let t = Cell::new(42u32);
        let clock = || t.get();
        assert_eq!(clock.micros(), 42);
        t.set(43);
        assert_eq!(clock.micros(), 43);
    }

    #[test]
    fn test_manual_clock_handles_share_time() {
        let clock = ManualClock::new(10);
        let other = clock.clone();
        clock.advance(5);
        assert_eq!(other.micros(), 15);
        other.set(100);
        assert_eq!(clock.micros(), 100);
    }

    #[test]
    fn test_manual_clock_wraps() {
        let clock = ManualClock::new(u32::MAX - 1);
        assert_eq!(clock.advance(3), 1);
        assert_eq!(clock.micros(), 1);
    }

    #[test]
    fn test_wrapping_delta_across_rollover() {
        let last = 0xFFFF_FF00u32;
        let now = 0x0000_0100u32;
        assert_eq!(now.wrapping_sub(last), 0x200);
    }

    #[test]
    fn test_monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock::new();
        let copy = clock;
        let a = clock.micros();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = copy.micros();
        assert!(b.wrapping_sub(a) >= 1_000);
    }
}
