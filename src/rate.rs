//! Render-loop throughput counter

use std::time::Instant;

/// Counts iterations per second of the render loop
#[derive(Debug, Default)]
pub struct RateCounter {
    start_time: Option<Instant>,
    iterations: u64,
}

impl RateCounter {
    /// Create a counter with no baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the baseline time
    pub fn start(mut self) -> Self {
        self.start_time = Some(Instant::now());
        self
    }

    /// Count one loop iteration
    pub fn increment(&mut self) {
        self.iterations += 1;
    }

    /// Iterations per second since the baseline.
    ///
    /// Returns 0.0 before `start()` or at zero elapsed time rather than
    /// dividing by zero.
    pub fn rate(&self) -> f64 {
        let Some(start) = self.start_time else {
            return 0.0;
        };
        let elapsed = start.elapsed().as_secs_f64();
        if elapsed <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / elapsed
    }
}
