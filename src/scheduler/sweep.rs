//! Quantum sweep.
//!
//! Runs one independent simulation per candidate quantum and reports the
//! quantum with the lowest average wait time. The default candidate range
//! is `1..=e_max + 2`; the first quantum reaching the minimum wins.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dispatching::{DispatchEngine, SimulationConfig};
use crate::models::{JobSet, Ticks};

/// AWT for one quantum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub quantum: Ticks,
    pub average_wait: f64,
}

/// Outcome of a quantum sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// One point per quantum, in ascending quantum order.
    pub points: Vec<SweepPoint>,
    /// First quantum achieving the minimum average wait.
    pub best_quantum: Ticks,
    /// The minimum average wait.
    pub min_average_wait: f64,
}

/// Runs the simulation across a range of quanta.
///
/// # Example
/// ```
/// use u_quantum::models::{JobSet, JobSpec};
/// use u_quantum::scheduler::QuantumSweep;
///
/// let jobs = JobSet::new(vec![
///     JobSpec::new("P1", 5, 0),
///     JobSpec::new("P2", 3, 1),
///     JobSpec::new("P3", 8, 2),
/// ]);
/// let result = QuantumSweep::new(&jobs).run();
///
/// assert_eq!(result.points.len(), 10);
/// assert_eq!(result.best_quantum, 1);
/// ```
#[derive(Debug, Clone)]
pub struct QuantumSweep<'a> {
    jobs: &'a JobSet,
    range: RangeInclusive<Ticks>,
}

impl<'a> QuantumSweep<'a> {
    /// Creates a sweep over `1..=e_max + 2`.
    pub fn new(jobs: &'a JobSet) -> Self {
        Self {
            jobs,
            range: 1..=jobs.e_max().saturating_add(2),
        }
    }

    /// Overrides the quantum range. A zero lower bound is raised to 1.
    pub fn with_range(mut self, range: RangeInclusive<Ticks>) -> Self {
        let (start, end) = range.into_inner();
        self.range = start.max(1)..=end;
        self
    }

    /// The quanta that will be simulated.
    pub fn quanta(&self) -> RangeInclusive<Ticks> {
        self.range.clone()
    }

    /// Runs every candidate quantum on a fresh copy of the job list.
    ///
    /// An empty range yields no points, `best_quantum` 0 and an infinite
    /// minimum.
    pub fn run(&self) -> SweepResult {
        let mut points = Vec::new();
        let mut best_quantum = 0;
        let mut min_average_wait = f64::INFINITY;

        for quantum in self.range.clone() {
            let config = SimulationConfig::default().with_quantum(quantum);
            let average_wait = DispatchEngine::new(self.jobs, &config).run().average_wait();
            if average_wait < min_average_wait {
                min_average_wait = average_wait;
                best_quantum = quantum;
            }
            points.push(SweepPoint {
                quantum,
                average_wait,
            });
        }

        info!(best_quantum, min_average_wait, runs = points.len(), "quantum sweep finished");
        SweepResult {
            points,
            best_quantum,
            min_average_wait,
        }
    }
}
