//! Run statistics and the quantum sweep.
//!
//! # KPI
//!
//! `RunKpi` computes per-run metrics: average wait, turnaround, response,
//! makespan, utilization, and context switches.
//!
//! # Sweep
//!
//! `QuantumSweep` repeats the simulation for every quantum in a range and
//! picks the one with the lowest average wait time.

mod kpi;
mod sweep;

pub use kpi::RunKpi;
pub use sweep::{QuantumSweep, SweepPoint, SweepResult};
