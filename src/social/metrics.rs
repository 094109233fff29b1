//! Ranking Timers
//!
//! Scoped timers around feed ranking and suggestion scoring. Elapsed time is
//! logged at debug level on drop, and at warn level when over a threshold.

use std::time::{Duration, Instant};

/// Performance timer for tracking operation duration
pub struct PerformanceTimer {
    start: Instant,
    label: &'static str,
    slow_threshold: Option<Duration>,
}

impl PerformanceTimer {
    pub fn new(label: &'static str) -> Self {
        Self {
            start: Instant::now(),
            label,
            slow_threshold: None,
        }
    }

    /// Warn on drop if the operation took longer than `threshold`
    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = Some(threshold);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn is_slow(&self) -> bool {
        self.slow_threshold
            .map(|threshold| self.elapsed() > threshold)
            .unwrap_or(false)
    }
}

impl Drop for PerformanceTimer {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        match self.slow_threshold {
            Some(threshold) if elapsed > threshold => tracing::warn!(
                "⚠️ Slow operation: {} took {}ms (threshold: {}ms)",
                self.label,
                elapsed.as_millis(),
                threshold.as_millis()
            ),
            _ => tracing::debug!("⏱️ {} completed in {}µs", self.label, elapsed.as_micros()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_without_threshold_is_never_slow() {
        let timer = PerformanceTimer::new("noop");
        std::thread::sleep(Duration::from_millis(2));
        assert!(!timer.is_slow());
        assert!(timer.elapsed() >= Duration::from_millis(2));
    }

    #[test]
    fn test_timer_threshold() {
        let timer = PerformanceTimer::new("sleepy").with_slow_threshold(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.is_slow());
    }
}
