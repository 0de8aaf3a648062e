//! Text rendering of run results.
//!
//! Produces the trace table (ready-queue membership and priorities at each
//! decision point), the Gantt chart, the waiting-time table, and the
//! quantum-sweep summary. Everything renders to `String`; callers decide
//! where it goes.

use crate::dispatching::priority_value;
use crate::models::{Process, RunOutcome, Ticks, TraceRow};
use crate::scheduler::SweepResult;

const TIE_NOTE: &str = " (both have the same e value, so priority is tarr)";

/// Renders the full report for one run: trace, Gantt chart, waiting times.
pub fn render_run(outcome: &RunOutcome) -> String {
    let mut out = render_trace(outcome);
    out.push('\n');
    out.push_str(&render_gantt(outcome));
    out.push('\n');
    out.push_str(&render_waits(outcome));
    out
}

/// Renders the trace table. Empty if the run did not record a trace.
pub fn render_trace(outcome: &RunOutcome) -> String {
    if outcome.trace.is_empty() {
        return String::new();
    }
    let mut out = String::from("Time  Processes in BH      Priority value of processes in BH\n");
    out.push_str(&"-".repeat(60));
    out.push('\n');
    for row in &outcome.trace {
        out.push_str(&render_trace_row(row, outcome.e_max));
        out.push('\n');
    }
    out
}

/// Renders one trace row.
///
/// Processes sharing an original execution time while both still hold
/// their full workload are shown by arrival time, since that is what
/// orders them.
pub fn render_trace_row(row: &TraceRow, e_max: Ticks) -> String {
    if row.queued.is_empty() {
        return format!("{:<5} {:<20}", row.time, "EMPTY").trim_end().to_string();
    }

    let names: Vec<&str> = row.queued.iter().map(|p| p.name.as_str()).collect();
    let mut tie_seen = false;
    let labels: Vec<String> = row
        .queued
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let tied = row.queued.iter().enumerate().any(|(k, other)| {
                i != k
                    && p.original_execution_time == other.original_execution_time
                    && p.remaining_execution_time == p.original_execution_time
                    && other.remaining_execution_time == other.original_execution_time
            });
            tie_seen |= tied;
            priority_label(p, e_max, tied)
        })
        .collect();

    let mut line = format!("{:<5} {:<20} {}", row.time, names.join(", "), labels.join(", "));
    if tie_seen {
        line.push_str(TIE_NOTE);
    }
    line
}

/// Describes how a queued process is ranked.
///
/// `by_arrival` shows the arrival time; otherwise a fresh process shows its
/// raw execution time and a preempted one shows the priority formula.
pub fn priority_label(process: &Process, e_max: Ticks, by_arrival: bool) -> String {
    if by_arrival {
        format!("{}: {}", process.name, process.arrival_time)
    } else if process.is_fresh() {
        format!("{}: {}", process.name, process.remaining_execution_time)
    } else {
        let r = process.remaining_execution_time;
        format!(
            "{}: (1/exp-(2*{}/(3*{}))^3)*{} = {:.3}",
            process.name,
            r,
            e_max,
            r,
            priority_value(r, e_max, false)
        )
    }
}

/// Renders the Gantt chart: a time row and the running process per tick.
pub fn render_gantt(outcome: &RunOutcome) -> String {
    let width = outcome
        .processes
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(0)
        .max(3);

    let mut times = String::from("Time: ");
    let mut running = String::from("PID : ");
    for (tick, slot) in outcome.gantt.iter().enumerate() {
        times.push_str(&format!("{tick:<width$} "));
        let name = slot
            .and_then(|id| outcome.processes.get(id))
            .map_or("", |p| p.name.as_str());
        running.push_str(&format!("{name:<width$} "));
    }

    format!(
        "Gantt Chart:\n{}\n{}\n",
        times.trim_end(),
        running.trim_end()
    )
}

/// Renders per-process waiting times and the AWT line.
pub fn render_waits(outcome: &RunOutcome) -> String {
    let mut out = String::from("PID   Waiting time\n");
    for p in &outcome.processes {
        out.push_str(&format!("{:<6}{}\n", p.name, p.total_wait_time));
    }
    out.push_str(&format!(
        "\nAWT = {}/{} = {:.2}\n",
        outcome.total_wait(),
        outcome.processes.len(),
        outcome.average_wait()
    ));
    out
}

/// Renders the sweep table and its minimum.
pub fn render_sweep(result: &SweepResult) -> String {
    let mut out = String::from("Quantum | AWT\n");
    for point in &result.points {
        out.push_str(&format!("{:<7} | {:.4}\n", point.quantum, point.average_wait));
    }
    if !result.points.is_empty() {
        out.push_str(&format!(
            "Minimum AWT: {:.4} found at q={}\n",
            result.min_average_wait, result.best_quantum
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::{DispatchEngine, SimulationConfig};
    use crate::models::{JobSet, JobSpec};
    use crate::scheduler::QuantumSweep;

    fn three_jobs() -> JobSet {
        JobSet::new(vec![
            JobSpec::new("P1", 5, 0),
            JobSpec::new("P2", 3, 1),
            JobSpec::new("P3", 8, 2),
        ])
    }

    fn traced(jobs: &JobSet, quantum: Ticks) -> RunOutcome {
        let config = SimulationConfig::default()
            .with_quantum(quantum)
            .with_trace(true);
        DispatchEngine::new(jobs, &config).run()
    }

    #[test]
    fn test_trace_rows() {
        let out = traced(&three_jobs(), 2);
        let lines: Vec<String> = out
            .trace
            .iter()
            .map(|row| render_trace_row(row, out.e_max))
            .collect();

        assert_eq!(lines[0], "0     P1                   P1: 5");
        assert_eq!(
            lines[1],
            "2     P1, P2, P3           P1: (1/exp-(2*3/(3*8))^3)*3 = 3.047, P2: 3, P3: 8"
        );
        assert_eq!(lines[9], "16    EMPTY");
    }

    #[test]
    fn test_tie_note() {
        let jobs = JobSet::new(vec![
            JobSpec::new("P1", 3, 0),
            JobSpec::new("P2", 6, 1),
            JobSpec::new("P3", 4, 2),
            JobSpec::new("P4", 2, 5),
            JobSpec::new("P5", 2, 6),
            JobSpec::new("P6", 5, 8),
        ]);
        let out = traced(&jobs, 3);
        let row = out.trace.iter().find(|r| r.time == 6).unwrap();
        assert_eq!(
            render_trace_row(row, out.e_max),
            "6     P2, P3, P4, P5       P2: 6, P3: (1/exp-(2*1/(3*6))^3)*1 = 1.001, \
             P4: 5, P5: 6 (both have the same e value, so priority is tarr)"
        );
    }

    #[test]
    fn test_gantt_with_idle() {
        let jobs = JobSet::new(vec![JobSpec::new("A", 1, 1), JobSpec::new("B", 1, 3)]);
        let out = traced(&jobs, 1);
        let gantt = render_gantt(&out);
        assert_eq!(gantt, "Gantt Chart:\nTime: 0   1   2   3\nPID :     A       B\n");
    }

    #[test]
    fn test_waits_table() {
        let out = traced(&three_jobs(), 2);
        let text = render_waits(&out);
        assert!(text.starts_with("PID   Waiting time\nP1    3\nP2    1\nP3    6\n"));
        assert!(text.ends_with("AWT = 10/3 = 3.33\n"));
    }

    #[test]
    fn test_render_run_sections() {
        let text = render_run(&traced(&three_jobs(), 1));
        assert!(text.contains("Priority value of processes in BH"));
        assert!(text.contains("Gantt Chart:"));
        assert!(text.contains("AWT = 9/3 = 3.00"));
    }

    #[test]
    fn test_untraced_run_renders_no_trace() {
        let config = SimulationConfig::default().with_quantum(2);
        let out = DispatchEngine::new(&three_jobs(), &config).run();
        assert!(out.trace.is_empty());
        assert_eq!(render_trace(&out), "");
        assert!(render_run(&out).contains("Gantt Chart:"));
    }

    #[test]
    fn test_sweep_summary() {
        let jobs = three_jobs();
        let text = render_sweep(&QuantumSweep::new(&jobs).with_range(1..=2).run());
        assert_eq!(
            text,
            "Quantum | AWT\n1       | 3.0000\n2       | 3.3333\nMinimum AWT: 3.0000 found at q=1\n"
        );
    }
}
