//! Time-stepped dispatch loop.
//!
//! Each step admits every job whose arrival time has passed, then either
//! idles for one tick (nothing ready yet), dispatches the best ready
//! process for up to one quantum, or finishes the run. Arrivals are also
//! admitted after every executed tick so that a job arriving mid-slice
//! competes at the very next dispatch decision.

use tracing::{debug, info, trace};

use super::{priority_value, SimulationConfig, SimulationRun};
use crate::heap::BinomialHeap;
use crate::models::{JobSet, Process, ProcessId, RunOutcome, Ticks, TraceRow};
use crate::validation::{validate_run, ValidationResult};

/// Engine state after the most recent step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Nothing ready, more arrivals pending.
    Idle,
    /// A process was dispatched.
    Dispatching,
    /// All jobs completed.
    Done,
}

/// What happened during one engine step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEvent {
    /// The CPU idled for the tick starting at `time`.
    Idle { time: Ticks },
    /// A process ran from `start` for `ran` ticks.
    Dispatched {
        id: ProcessId,
        start: Ticks,
        ran: Ticks,
        waited: Ticks,
        finished: bool,
    },
    /// The run is over.
    Done,
}

/// Discrete-time round-robin simulator over a dynamic-priority queue.
///
/// Owns one heap and one working copy of the job list. The working copy is
/// authoritative for wait accounting; heap entries are copies and are
/// reconciled by process id.
///
/// # Example
/// ```
/// use u_quantum::dispatching::{DispatchEngine, SimulationConfig};
/// use u_quantum::models::{JobSet, JobSpec};
///
/// let jobs = JobSet::new(vec![
///     JobSpec::new("P1", 5, 0),
///     JobSpec::new("P2", 3, 1),
///     JobSpec::new("P3", 8, 2),
/// ]);
/// let outcome = DispatchEngine::new(&jobs, &SimulationConfig::default().with_quantum(2)).run();
///
/// assert_eq!(outcome.completion_order, vec![1, 0, 2]);
/// assert!((outcome.average_wait() - 10.0 / 3.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct DispatchEngine {
    run: SimulationRun,
    heap: BinomialHeap,
    processes: Vec<Process>,
    arrival_order: Vec<ProcessId>,
    next_arrival: usize,
    now: Ticks,
    completed: usize,
    state: EngineState,
    gantt: Vec<Option<ProcessId>>,
    trace: Vec<TraceRow>,
    completion_order: Vec<ProcessId>,
    completion_times: Vec<Option<Ticks>>,
    first_run_times: Vec<Option<Ticks>>,
}

impl DispatchEngine {
    /// Creates an engine for `jobs`.
    ///
    /// The configuration is assumed valid; see [`simulate`] for the
    /// checked entry point.
    pub fn new(jobs: &JobSet, config: &SimulationConfig) -> Self {
        let processes = jobs.processes();
        let mut arrival_order: Vec<ProcessId> = (0..processes.len()).collect();
        // Stable: equal arrivals keep input order
        arrival_order.sort_by_key(|&id| processes[id].arrival_time);
        let count = processes.len();

        Self {
            run: SimulationRun::new(jobs, config),
            heap: BinomialHeap::new(),
            processes,
            arrival_order,
            next_arrival: 0,
            now: 0,
            completed: 0,
            state: EngineState::Idle,
            gantt: Vec::new(),
            trace: Vec::new(),
            completion_order: Vec::with_capacity(count),
            completion_times: vec![None; count],
            first_run_times: vec![None; count],
        }
    }

    /// Current clock value.
    pub fn now(&self) -> Ticks {
        self.now
    }

    /// State after the most recent step.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The run context.
    pub fn context(&self) -> &SimulationRun {
        &self.run
    }

    /// The ready queue.
    pub fn ready_queue(&self) -> &BinomialHeap {
        &self.heap
    }

    /// Authoritative per-process state, indexed by id.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Number of completed jobs.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Advances the simulation by one decision.
    pub fn step(&mut self) -> StepEvent {
        if self.state == EngineState::Done {
            return StepEvent::Done;
        }
        if self.completed == self.processes.len() {
            self.finish();
            return StepEvent::Done;
        }

        self.admit_arrivals();
        if self.run.record_trace {
            self.trace.push(TraceRow::new(self.now, self.heap.snapshot()));
        }

        match self.heap.extract_best() {
            Some(process) => self.dispatch(process),
            None if self.next_arrival < self.arrival_order.len() => {
                trace!(time = self.now, "cpu idle");
                let time = self.now;
                self.gantt.push(None);
                self.now += 1;
                self.state = EngineState::Idle;
                StepEvent::Idle { time }
            }
            None => {
                self.finish();
                StepEvent::Done
            }
        }
    }

    /// Runs to completion and returns the outcome.
    pub fn run(mut self) -> RunOutcome {
        while self.step() != StepEvent::Done {}
        self.into_outcome()
    }

    /// Packages the recorded data. Unfinished processes report 0 times.
    pub fn into_outcome(self) -> RunOutcome {
        RunOutcome {
            quantum: self.run.quantum,
            e_max: self.run.e_max,
            processes: self.processes,
            gantt: self.gantt,
            trace: self.trace,
            completion_order: self.completion_order,
            completion_times: self
                .completion_times
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect(),
            first_run_times: self
                .first_run_times
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect(),
        }
    }

    fn dispatch(&mut self, mut current: Process) -> StepEvent {
        let id = current.id;
        let start = self.now;
        let waited = start - current.last_queued_at;
        self.processes[id].total_wait_time += waited;
        self.first_run_times[id].get_or_insert(start);

        let ran = current.remaining_execution_time.min(self.run.quantum);
        for _ in 0..ran {
            self.gantt.push(Some(id));
            self.now += 1;
            self.admit_arrivals();
        }

        current.remaining_execution_time -= ran;
        let finished = current.remaining_execution_time == 0;
        let working = &mut self.processes[id];
        working.remaining_execution_time = current.remaining_execution_time;

        if finished {
            self.completed += 1;
            self.completion_order.push(id);
            self.completion_times[id] = Some(self.now);
            debug!(process = %current.name, start, ran, waited, end = self.now, "completed");
        } else {
            current.priority_value =
                priority_value(current.remaining_execution_time, self.run.e_max, false);
            current.last_queued_at = self.now;
            working.priority_value = current.priority_value;
            working.last_queued_at = self.now;
            debug!(
                process = %current.name,
                start,
                ran,
                waited,
                remaining = current.remaining_execution_time,
                priority = current.priority_value,
                "preempted"
            );
            self.heap.insert(current);
        }

        self.state = EngineState::Dispatching;
        StepEvent::Dispatched {
            id,
            start,
            ran,
            waited,
            finished,
        }
    }

    /// Queues every pending job whose arrival time has been reached.
    fn admit_arrivals(&mut self) {
        while let Some(&id) = self.arrival_order.get(self.next_arrival) {
            let process = &mut self.processes[id];
            if process.arrival_time > self.now {
                break;
            }
            process.priority_value =
                priority_value(process.original_execution_time, self.run.e_max, true);
            process.last_queued_at = self.now;
            trace!(process = %process.name, time = self.now, "admitted");
            self.heap.insert(process.clone());
            self.next_arrival += 1;
        }
    }

    fn finish(&mut self) {
        if self.state == EngineState::Done {
            return;
        }
        if self.run.record_trace {
            self.trace.push(TraceRow::new(self.now, Vec::new()));
        }
        self.state = EngineState::Done;

        let total_wait: Ticks = self.processes.iter().map(|p| p.total_wait_time).sum();
        info!(
            quantum = self.run.quantum,
            jobs = self.processes.len(),
            end = self.now,
            total_wait,
            "simulation finished"
        );
    }
}

/// Validates the inputs, then runs one full simulation.
pub fn simulate(jobs: &JobSet, config: &SimulationConfig) -> ValidationResult<RunOutcome> {
    validate_run(jobs, config)?;
    Ok(DispatchEngine::new(jobs, config).run())
}
