//! Simulation domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `JobSpec` | Static job description from a job source |
//! | `JobSet` | The input job list; defines ids and `E_MAX` |
//! | `Process` | Per-run working copy with mutable scheduling state |
//! | `TraceRow` | Ready-queue snapshot at a decision point |
//! | `RunOutcome` | Everything a finished run hands to reporting |

mod process;
mod trace;
pub mod workload;

pub use process::{JobSet, JobSpec, Process, ProcessId, Ticks};
pub use trace::{RunOutcome, TraceRow};
