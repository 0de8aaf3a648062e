//! Per-run simulation context.

use super::SimulationConfig;
use crate::models::{JobSet, Ticks};

/// Immutable parameters shared by every step of one simulation run.
///
/// Built fresh for each run so that separate runs (e.g., different quanta
/// in a sweep) never share state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRun {
    /// Longest execution time in the job set.
    pub e_max: Ticks,
    /// Time slice length.
    pub quantum: Ticks,
    /// Whether decision-point snapshots are recorded.
    pub record_trace: bool,
}

impl SimulationRun {
    /// Creates a context for running `jobs` under `config`.
    pub fn new(jobs: &JobSet, config: &SimulationConfig) -> Self {
        Self {
            e_max: jobs.e_max(),
            quantum: config.quantum,
            record_trace: config.record_trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobSpec;

    #[test]
    fn test_context_from_jobs() {
        let jobs = JobSet::new(vec![JobSpec::new("A", 4, 0), JobSpec::new("B", 9, 3)]);
        let config = SimulationConfig::default().with_quantum(2).with_trace(true);
        let run = SimulationRun::new(&jobs, &config);
        assert_eq!(run.e_max, 9);
        assert_eq!(run.quantum, 2);
        assert!(run.record_trace);
    }
}
