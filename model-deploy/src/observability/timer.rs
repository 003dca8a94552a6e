//! Timing of pipeline steps.

use std::time::Instant;

/// Measures one pipeline step and logs its duration when finished.
#[derive(Debug)]
pub struct StepTimer {
    start: Instant,
    name: &'static str,
}

impl StepTimer {
    /// Starts timing a step.
    #[must_use]
    pub fn start(name: &'static str) -> Self {
        tracing::debug!(step = name, "Step started");
        Self {
            start: Instant::now(),
            name,
        }
    }

    /// Returns the elapsed time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Returns the step name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Finishes the step, logs and returns its duration.
    pub fn finish(self) -> f64 {
        let duration_ms = self.elapsed_ms();
        tracing::debug!(step = self.name, duration_ms, "Step finished");
        duration_ms
    }
}
