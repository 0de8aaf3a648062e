//! Job and process models.
//!
//! A [`JobSpec`] is the static description of one job as supplied by a job
//! source. A [`Process`] is the per-run working copy that carries the
//! mutable scheduling state (remaining work, queue timestamps, wait time,
//! priority).

use serde::{Deserialize, Serialize};

/// Simulation clock unit.
pub type Ticks = u64;

/// Stable process identifier: the 0-based position in the input job list.
pub type ProcessId = usize;

/// Static description of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Display name (e.g., "P1").
    pub name: String,
    /// Total CPU time the job needs (ticks).
    pub execution_time: Ticks,
    /// Tick at which the job becomes ready.
    pub arrival_time: Ticks,
}

impl JobSpec {
    /// Creates a new job description.
    pub fn new(name: impl Into<String>, execution_time: Ticks, arrival_time: Ticks) -> Self {
        Self {
            name: name.into(),
            execution_time,
            arrival_time,
        }
    }
}

/// A process and its scheduling state within one simulation run.
///
/// The identity fields (`name`, `id`, `original_execution_time`,
/// `arrival_time`) never change. The remaining fields are reset whenever a
/// fresh working copy is made for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub name: String,
    pub id: ProcessId,
    pub original_execution_time: Ticks,
    pub arrival_time: Ticks,
    /// Work left (ticks). Decreases monotonically to 0.
    pub remaining_execution_time: Ticks,
    /// Tick at which the process most recently entered the ready queue.
    pub last_queued_at: Ticks,
    /// Accumulated time spent in the ready queue.
    pub total_wait_time: Ticks,
    /// Current priority value. Lower = dispatched sooner.
    pub priority_value: f64,
}

impl Process {
    /// Creates a process in its initial (never admitted) state.
    pub fn new(id: ProcessId, spec: &JobSpec) -> Self {
        Self {
            name: spec.name.clone(),
            id,
            original_execution_time: spec.execution_time,
            arrival_time: spec.arrival_time,
            remaining_execution_time: spec.execution_time,
            last_queued_at: spec.arrival_time,
            total_wait_time: 0,
            priority_value: spec.execution_time as f64,
        }
    }

    /// Whether the process has not yet executed since its first admission.
    pub fn is_fresh(&self) -> bool {
        self.remaining_execution_time == self.original_execution_time
            && self.last_queued_at == self.arrival_time
    }

    /// Whether all work is done.
    pub fn is_finished(&self) -> bool {
        self.remaining_execution_time == 0
    }
}

/// The static job list a simulation is built from.
///
/// Process ids are assigned from the position in this list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSet {
    pub jobs: Vec<JobSpec>,
}

impl JobSet {
    /// Creates a job set from the given jobs (input order is preserved).
    pub fn new(jobs: Vec<JobSpec>) -> Self {
        Self { jobs }
    }

    /// Adds a job at the end of the list.
    pub fn with_job(mut self, job: JobSpec) -> Self {
        self.jobs.push(job);
        self
    }

    /// Largest execution time over the whole set (`E_MAX`). 0 when empty.
    pub fn e_max(&self) -> Ticks {
        self.jobs
            .iter()
            .map(|j| j.execution_time)
            .max()
            .unwrap_or(0)
    }

    /// Sum of all execution times, saturating at `Ticks::MAX`.
    pub fn total_work(&self) -> Ticks {
        self.jobs
            .iter()
            .fold(0, |acc: Ticks, j| acc.saturating_add(j.execution_time))
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the set has no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Fresh per-run working copies, indexed by process id.
    pub fn processes(&self) -> Vec<Process> {
        self.jobs
            .iter()
            .enumerate()
            .map(|(id, spec)| Process::new(id, spec))
            .collect()
    }
}

impl From<Vec<JobSpec>> for JobSet {
    fn from(jobs: Vec<JobSpec>) -> Self {
        Self::new(jobs)
    }
}
