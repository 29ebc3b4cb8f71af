/// Default number of loop iterations
pub const DEFAULT_ITERATIONS: u64 = 10_000_000;

/// Configuration for the float workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadConfig {
    /// Upper bound (inclusive) of the summation range, starting at 1
    pub iterations: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl WorkloadConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of iterations
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }
}
