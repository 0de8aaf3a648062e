//! Run quality metrics (KPIs).
//!
//! Computes standard CPU-scheduling performance indicators from a
//! finished simulation run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Average Wait (AWT) | Mean total ready-queue time |
//! | Max Wait | Largest single process wait |
//! | Avg Turnaround | Mean(completion - arrival) |
//! | Avg Response | Mean(first dispatch - arrival) |
//! | Makespan | Tick at which the last job completed |
//! | Utilization | Busy ticks / makespan |
//! | Context Switches | Changes of running process in the Gantt record |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{RunOutcome, Ticks};

/// Run performance indicators.
///
/// All time values are in ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunKpi {
    /// Quantum of the measured run.
    pub quantum: Ticks,
    /// Sum of wait time across all processes.
    pub total_wait: Ticks,
    /// Average wait time (AWT).
    pub average_wait: f64,
    /// Maximum wait of any single process.
    pub max_wait: Ticks,
    /// Average turnaround: mean(completion - arrival).
    pub average_turnaround: f64,
    /// Average response: mean(first run - arrival).
    pub average_response: f64,
    /// Completion time of the last job.
    pub makespan: Ticks,
    /// Fraction of the makespan the CPU was busy (0.0..1.0).
    pub utilization: f64,
    /// Ticks with nothing to run.
    pub idle_ticks: Ticks,
    /// Number of times the running process changed.
    pub context_switches: usize,
}

impl RunKpi {
    /// Computes KPIs from a finished run.
    pub fn calculate(outcome: &RunOutcome) -> Self {
        let count = outcome.processes.len();
        let mut total_turnaround: f64 = 0.0;
        let mut total_response: f64 = 0.0;
        let mut max_wait: Ticks = 0;

        for (id, process) in outcome.processes.iter().enumerate() {
            max_wait = max_wait.max(process.total_wait_time);
            let completion = outcome.completion_times.get(id).copied().unwrap_or(0);
            let first_run = outcome.first_run_times.get(id).copied().unwrap_or(0);
            total_turnaround += completion.saturating_sub(process.arrival_time) as f64;
            total_response += first_run.saturating_sub(process.arrival_time) as f64;
        }

        let makespan = outcome.end_time();
        let busy = outcome.busy_ticks();
        let utilization = if makespan == 0 {
            0.0
        } else {
            busy as f64 / makespan as f64
        };

        let mut context_switches = 0;
        let mut last_running = None;
        for id in outcome.gantt.iter().flatten() {
            if last_running.is_some_and(|last| last != *id) {
                context_switches += 1;
            }
            last_running = Some(*id);
        }

        let mean = |total: f64| if count == 0 { 0.0 } else { total / count as f64 };

        Self {
            quantum: outcome.quantum,
            total_wait: outcome.total_wait(),
            average_wait: outcome.average_wait(),
            max_wait,
            average_turnaround: mean(total_turnaround),
            average_response: mean(total_response),
            makespan,
            utilization,
            idle_ticks: makespan - busy,
            context_switches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::{DispatchEngine, SimulationConfig};
    use crate::models::{JobSet, JobSpec};

    fn outcome(jobs: &JobSet, quantum: Ticks) -> RunOutcome {
        DispatchEngine::new(jobs, &SimulationConfig::default().with_quantum(quantum)).run()
    }

    #[test]
    fn test_kpi_basic() {
        let jobs = JobSet::new(vec![
            JobSpec::new("P1", 5, 0),
            JobSpec::new("P2", 3, 1),
            JobSpec::new("P3", 8, 2),
        ]);
        let kpi = RunKpi::calculate(&outcome(&jobs, 2));

        assert_eq!(kpi.quantum, 2);
        assert_eq!(kpi.total_wait, 10);
        assert_eq!(kpi.max_wait, 6);
        assert_eq!(kpi.makespan, 16);
        assert_eq!(kpi.idle_ticks, 0);
        assert!((kpi.utilization - 1.0).abs() < 1e-10);
        // Turnaround: P1 8, P2 4, P3 14
        assert!((kpi.average_turnaround - 26.0 / 3.0).abs() < 1e-10);
        // Response: P1 0, P2 1, P3 6
        assert!((kpi.average_response - 7.0 / 3.0).abs() < 1e-10);
        // P1 → P2 → P1 → P3
        assert_eq!(kpi.context_switches, 3);
    }

    #[test]
    fn test_kpi_idle_time() {
        let jobs = JobSet::new(vec![
            JobSpec::new("A", 2, 3),
            JobSpec::new("B", 2, 1),
            JobSpec::new("C", 3, 9),
        ]);
        let kpi = RunKpi::calculate(&outcome(&jobs, 1));

        assert_eq!(kpi.makespan, 12);
        assert_eq!(kpi.idle_ticks, 5);
        assert!((kpi.utilization - 7.0 / 12.0).abs() < 1e-10);
        assert_eq!(kpi.total_wait, 0);
        // B → A → C, idle gaps do not count
        assert_eq!(kpi.context_switches, 2);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = RunKpi::calculate(&outcome(&JobSet::default(), 1));
        assert_eq!(kpi.makespan, 0);
        assert_eq!(kpi.average_wait, 0.0);
        assert_eq!(kpi.utilization, 0.0);
        assert_eq!(kpi.context_switches, 0);
    }

    #[test]
    fn test_kpi_serde() {
        let jobs = JobSet::new(vec![JobSpec::new("A", 2, 0)]);
        let kpi = RunKpi::calculate(&outcome(&jobs, 1));
        let json = serde_json::to_value(&kpi).unwrap();
        assert_eq!(json["makespan"], 2);
        assert_eq!(json["context_switches"], 0);
    }
}
