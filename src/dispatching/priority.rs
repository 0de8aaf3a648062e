//! Priority function and tie-break rule.
//!
//! # Priority
//!
//! A process entering the ready queue for the first time is scored by its
//! raw execution time. A preempted process is rescored with a correction
//! factor relative to the longest job in the set:
//!
//! ```text
//! ratio    = (2 * remaining) / (3 * e_max)
//! priority = remaining / exp(-ratio^3)
//! ```
//!
//! Lower values are dispatched first.
//!
//! # Tie-break
//!
//! Jobs of equal original length are ordered by arrival time alone; the
//! computed priority is not consulted for them.

use crate::models::{Process, Ticks};

/// Priority value of a process with `remaining` ticks of work.
///
/// `e_max == 0` falls back to the raw remaining time.
pub fn priority_value(remaining: Ticks, e_max: Ticks, is_first_insertion: bool) -> f64 {
    let remaining = remaining as f64;
    if is_first_insertion || e_max == 0 {
        return remaining;
    }
    let ratio = (2.0 * remaining) / (3.0 * e_max as f64);
    remaining / (-ratio.powi(3)).exp()
}

/// Whether `a` should be dispatched before `b`.
///
/// Strict: a full tie returns `false` in both directions. Not transitive
/// across mixed lengths, so it is not a sort key.
pub fn is_higher_priority(a: &Process, b: &Process) -> bool {
    if a.original_execution_time == b.original_execution_time {
        return a.arrival_time < b.arrival_time;
    }
    if a.priority_value != b.priority_value {
        return a.priority_value < b.priority_value;
    }
    a.arrival_time < b.arrival_time
}
