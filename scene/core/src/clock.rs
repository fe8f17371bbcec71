//! Loop Clock
//!
//! The epoch start is the only state that changes from frame to frame. It is
//! reset to "now" whenever the elapsed time reaches [`LOOP_SECS`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::timeline::LOOP_SECS;

/// Source of monotonic "now" readings
pub trait TimeSource {
    /// Time since an arbitrary fixed origin
    fn now(&self) -> Duration;
}

/// Process monotonic clock
#[derive(Clone, Copy, Debug)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven time, shared between clones
///
/// Used by tests and the dump tool to inject exact elapsed values.
#[derive(Clone, Debug, Default)]
pub struct ManualTime {
    now: Rc<Cell<Duration>>,
}

impl ManualTime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to an absolute reading
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    /// Move forward by `delta`
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }

    /// Move forward by a number of seconds
    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Result of sampling the clock for a frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockSample {
    /// Seconds into the current loop
    pub elapsed: f64,
    /// Whether this sample restarted the loop
    pub wrapped: bool,
}

/// Loop clock tracking the epoch start
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    epoch_start: Duration,
    wraps: u64,
}

impl Clock {
    /// Start a loop at `now`
    #[must_use]
    pub fn starting_at(now: Duration) -> Self {
        Self {
            epoch_start: now,
            wraps: 0,
        }
    }

    /// Elapsed seconds at `now`, without touching the epoch
    #[must_use]
    pub fn elapsed_at(&self, now: Duration) -> f64 {
        now.saturating_sub(self.epoch_start).as_secs_f64()
    }

    /// Elapsed seconds for the frame at `now`
    ///
    /// Once the loop length is reached the epoch moves to `now` and the
    /// frame is drawn as the first frame of the next loop.
    pub fn sample(&mut self, now: Duration) -> ClockSample {
        let elapsed = self.elapsed_at(now);
        if elapsed >= LOOP_SECS {
            self.epoch_start = now;
            self.wraps += 1;
            return ClockSample {
                elapsed: 0.0,
                wrapped: true,
            };
        }
        ClockSample {
            elapsed,
            wrapped: false,
        }
    }

    /// How many times the loop has restarted
    #[must_use]
    pub fn wraps(&self) -> u64 {
        self.wraps
    }
}
