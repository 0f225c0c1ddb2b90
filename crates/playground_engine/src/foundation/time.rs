//! Time management utilities

use std::time::{Duration, Instant};

/// Frame clock fed with the host's elapsed time.
///
/// The render loop reports the total time since start; the clock turns that
/// into a per-frame delta by remembering the previous reading.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    previous_elapsed: f64,
    frame_count: u64,
}

impl FrameClock {
    /// Create a new clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new elapsed reading (seconds) and return the time since the last one.
    ///
    /// A reading older than the previous one yields a zero delta and is not stored.
    pub fn tick(&mut self, elapsed: f64) -> f64 {
        self.frame_count += 1;
        if !elapsed.is_finite() || elapsed < self.previous_elapsed {
            log::trace!(
                "Ignoring non-monotonic clock reading {} (previous {})",
                elapsed,
                self.previous_elapsed
            );
            return 0.0;
        }
        let delta = elapsed - self.previous_elapsed;
        self.previous_elapsed = elapsed;
        delta
    }

    /// Last elapsed reading in seconds
    pub fn elapsed(&self) -> f64 {
        self.previous_elapsed
    }

    /// Number of ticks recorded so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Wall-clock timer for load-time log lines
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Start timing now
    pub fn start_new() -> Self {
        Self { started: Instant::now() }
    }

    /// Time since [`Stopwatch::start_new`]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time since [`Stopwatch::start_new`], in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_tick_measures_from_zero() {
        let mut clock = FrameClock::new();
        assert_relative_eq!(clock.tick(0.016), 0.016);
        assert_relative_eq!(clock.elapsed(), 0.016);
    }

    #[test]
    fn test_consecutive_ticks_return_deltas() {
        let mut clock = FrameClock::new();
        clock.tick(1.0);
        assert_relative_eq!(clock.tick(1.5), 0.5);
        assert_relative_eq!(clock.tick(1.5), 0.0);
        assert_eq!(clock.frame_count(), 3);
    }

    #[test]
    fn test_backwards_reading_is_ignored() {
        let mut clock = FrameClock::new();
        clock.tick(2.0);
        assert_relative_eq!(clock.tick(1.0), 0.0);
        assert_relative_eq!(clock.elapsed(), 2.0);
        assert_relative_eq!(clock.tick(f64::NAN), 0.0);
    }

    #[test]
    fn test_stopwatch_only_moves_forward() {
        let stopwatch = Stopwatch::start_new();
        let first = stopwatch.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert!(stopwatch.elapsed() > first);
        assert!(stopwatch.elapsed_millis() >= 2.0);
    }
}
