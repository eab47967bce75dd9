// src/core/stopwatch.rs

//! Labelled monotonic timer.

use std::time::{Duration, Instant};

/// A monotonic timer for a single task.
/// Records the start instant on creation; the first `stop` freezes the elapsed time.
#[derive(Debug)]
pub struct StopWatch {
    label: String,
    task: String,
    start: Instant,
    elapsed: Option<Duration>,
}

impl StopWatch {
    /// Creates a new timer and starts it immediately.
    pub fn start(label: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            task: task.into(),
            start: Instant::now(),
            elapsed: None,
        }
    }

    /// Stops the timer and returns the elapsed time. Stopping twice returns
    /// the time measured by the first call.
    pub fn stop(&mut self) -> Duration {
        *self.elapsed.get_or_insert_with(|| self.start.elapsed())
    }

    /// `true` until the first `stop`.
    pub fn is_running(&self) -> bool {
        self.elapsed.is_none()
    }

    /// Time measured so far, or the frozen value once stopped.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.start.elapsed())
    }

    /// Label given at start, e.g. `Profiling for 'Inventory'`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Name of the timed task.
    pub fn task(&self) -> &str {
        &self.task
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_stop_freezes_elapsed_time() {
        let mut clock = StopWatch::start("Profiling for 'Observable'", "Observable.test");
        assert!(clock.is_running());
        thread::sleep(Duration::from_millis(5));

        let first = clock.stop();
        assert!(!clock.is_running());
        assert!(first >= Duration::from_millis(5));

        thread::sleep(Duration::from_millis(5));
        assert_eq!(clock.stop(), first);
        assert_eq!(clock.elapsed(), first);
        assert_eq!(clock.label(), "Profiling for 'Observable'");
        assert_eq!(clock.task(), "Observable.test");
    }
}
