//! Run output models: trace rows, the Gantt record, and the run outcome.

use serde::{Deserialize, Serialize};

use super::{Process, ProcessId, Ticks};

/// Ready-queue membership at one decision point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRow {
    /// Clock value when the snapshot was taken.
    pub time: Ticks,
    /// Queued processes, sorted by id.
    pub queued: Vec<Process>,
}

impl TraceRow {
    /// Builds a row, sorting the snapshot by process id.
    pub fn new(time: Ticks, mut queued: Vec<Process>) -> Self {
        queued.sort_by_key(|p| p.id);
        Self { time, queued }
    }

    /// Whether the ready queue was empty.
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }
}

/// Result of one complete simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Quantum the run used.
    pub quantum: Ticks,
    /// Longest execution time in the job set.
    pub e_max: Ticks,
    /// Final state of every process, indexed by id.
    pub processes: Vec<Process>,
    /// Running process per tick; `None` marks an idle tick.
    pub gantt: Vec<Option<ProcessId>>,
    /// Decision-point snapshots (empty unless tracing was enabled).
    pub trace: Vec<TraceRow>,
    /// Process ids in the order they finished.
    pub completion_order: Vec<ProcessId>,
    /// Completion tick per process id.
    pub completion_times: Vec<Ticks>,
    /// First dispatch tick per process id.
    pub first_run_times: Vec<Ticks>,
}

impl RunOutcome {
    /// Clock value when the last job finished.
    pub fn end_time(&self) -> Ticks {
        self.gantt.len() as Ticks
    }

    /// Sum of every process's total wait time.
    pub fn total_wait(&self) -> Ticks {
        self.processes.iter().map(|p| p.total_wait_time).sum()
    }

    /// Average wait time (AWT). 0.0 for an empty job set.
    pub fn average_wait(&self) -> f64 {
        if self.processes.is_empty() {
            0.0
        } else {
            self.total_wait() as f64 / self.processes.len() as f64
        }
    }

    /// Number of ticks the CPU was running some process.
    pub fn busy_ticks(&self) -> Ticks {
        self.gantt.iter().filter(|slot| slot.is_some()).count() as Ticks
    }

    /// Ticks executed by a single process.
    pub fn ticks_run_by(&self, id: ProcessId) -> Ticks {
        self.gantt.iter().filter(|slot| **slot == Some(id)).count() as Ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobSpec;

    fn outcome() -> RunOutcome {
        let mut a = Process::new(0, &JobSpec::new("A", 2, 0));
        let mut b = Process::new(1, &JobSpec::new("B", 1, 1));
        a.total_wait_time = 1;
        b.total_wait_time = 2;
        RunOutcome {
            quantum: 1,
            e_max: 2,
            processes: vec![a, b],
            gantt: vec![Some(0), None, Some(1), Some(0)],
            trace: Vec::new(),
            completion_order: vec![1, 0],
            completion_times: vec![4, 3],
            first_run_times: vec![0, 2],
        }
    }

    #[test]
    fn test_outcome_statistics() {
        let out = outcome();
        assert_eq!(out.end_time(), 4);
        assert_eq!(out.total_wait(), 3);
        assert!((out.average_wait() - 1.5).abs() < 1e-10);
        assert_eq!(out.busy_ticks(), 3);
        assert_eq!(out.ticks_run_by(0), 2);
        assert_eq!(out.ticks_run_by(1), 1);
    }

    #[test]
    fn test_trace_row_sorted_by_id() {
        let p0 = Process::new(0, &JobSpec::new("A", 2, 0));
        let p1 = Process::new(1, &JobSpec::new("B", 1, 1));
        let row = TraceRow::new(3, vec![p1, p0]);
        assert_eq!(row.queued[0].id, 0);
        assert_eq!(row.queued[1].id, 1);
        assert!(!row.is_empty());
    }
}
