//! Simulation run configuration.

use crate::models::Ticks;

/// Configuration for one simulation run.
///
/// # Examples
///
/// ```
/// use u_quantum::dispatching::SimulationConfig;
///
/// let config = SimulationConfig::default()
///     .with_quantum(3)
///     .with_trace(true)
///     .with_horizon(1000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Maximum contiguous ticks a dispatched process may run.
    pub quantum: Ticks,

    /// Record a ready-queue snapshot at every decision point.
    ///
    /// Off by default; sweeps only need the final statistics.
    pub record_trace: bool,

    /// Upper bound on simulated ticks. `None` = unbounded.
    ///
    /// A job set that could need more ticks than this is rejected by
    /// [`crate::validation::validate_run`] before the run starts.
    pub horizon: Option<Ticks>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            quantum: 1,
            record_trace: false,
            horizon: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_quantum(mut self, quantum: Ticks) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    pub fn with_horizon(mut self, ticks: Ticks) -> Self {
        self.horizon = Some(ticks);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.quantum == 0 {
            return Err("quantum must be at least 1 tick".into());
        }
        if self.horizon == Some(0) {
            return Err("horizon must be positive".into());
        }
        Ok(())
    }
}
