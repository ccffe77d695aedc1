#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-rate tick scheduler.
//!
//! The scheduler converts wall-clock frame time into a whole number of
//! simulation ticks. At most one tick source is active at a time: starting
//! issues a [`TickHandle`] for a new generation, stopping releases it together
//! with any pending time, and handles from earlier generations are reported
//! as inactive.

use std::time::Duration;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Generation token identifying the active tick source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle {
    generation: u64,
}

impl TickHandle {
    /// Generation number the handle was issued for.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Configuration parameters required to construct the scheduler.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    tick_rate_hz: u32,
    max_catch_up_ticks: u32,
}

impl Config {
    /// Creates a new configuration.
    ///
    /// Zero values are raised to one.
    #[must_use]
    pub fn new(tick_rate_hz: u32, max_catch_up_ticks: u32) -> Self {
        Self {
            tick_rate_hz: tick_rate_hz.max(1),
            max_catch_up_ticks: max_catch_up_ticks.max(1),
        }
    }
}

/// Accumulates elapsed time and releases it as fixed-length ticks.
#[derive(Debug)]
pub struct TickScheduler {
    interval: Duration,
    max_catch_up_ticks: u32,
    accumulator: Duration,
    active: Option<TickHandle>,
    generation: u64,
}

impl TickScheduler {
    /// Creates a stopped scheduler using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            interval: Duration::from_nanos(NANOS_PER_SECOND / u64::from(config.tick_rate_hz)),
            max_catch_up_ticks: config.max_catch_up_ticks,
            accumulator: Duration::ZERO,
            active: None,
            generation: 0,
        }
    }

    /// Length of a single tick.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Activates the tick source, returning its handle.
    ///
    /// Starting an already running scheduler returns the existing handle.
    pub fn start(&mut self) -> TickHandle {
        if let Some(handle) = self.active {
            return handle;
        }

        self.generation = self.generation.wrapping_add(1);
        let handle = TickHandle {
            generation: self.generation,
        };
        self.accumulator = Duration::ZERO;
        self.active = Some(handle);
        handle
    }

    /// Releases the active handle and discards pending time.
    ///
    /// Returns the released handle, or `None` if the scheduler was stopped.
    pub fn stop(&mut self) -> Option<TickHandle> {
        self.accumulator = Duration::ZERO;
        self.active.take()
    }

    /// Reports whether a tick source is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Reports whether `handle` identifies the currently active tick source.
    #[must_use]
    pub fn is_active(&self, handle: TickHandle) -> bool {
        self.active == Some(handle)
    }

    /// Time accrued toward the next tick.
    #[must_use]
    pub fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Accrues `elapsed` time and returns the number of ticks now due.
    ///
    /// Nothing accrues while stopped. When more than the configured catch-up
    /// limit is due, the surplus backlog is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.active.is_none() {
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(elapsed);
        let mut ticks = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            ticks += 1;
            if ticks == self.max_catch_up_ticks {
                if self.accumulator >= self.interval {
                    self.accumulator = Duration::ZERO;
                }
                break;
            }
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_hertz_interval() {
        let scheduler = TickScheduler::new(Config::new(60, 6));
        assert_eq!(scheduler.interval(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn zero_rate_is_raised_to_one_hertz() {
        let scheduler = TickScheduler::new(Config::new(0, 0));
        assert_eq!(scheduler.interval(), Duration::from_secs(1));
    }
}
