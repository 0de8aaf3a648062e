//! Dynamic-priority round-robin CPU scheduling simulator.
//!
//! Ready processes wait in a binomial heap ordered by a priority that is
//! recomputed from their remaining work each time they are preempted. The
//! best process runs for one time quantum, arrivals are admitted tick by
//! tick, and unfinished work is requeued.
//!
//! # Modules
//!
//! - **`models`**: `JobSpec`, `JobSet`, `Process`, trace and outcome types
//! - **`heap`**: Arena-backed binomial heap with the dispatch tie-break order
//! - **`dispatching`**: Priority function, run configuration, dispatch engine
//! - **`scheduler`**: Run KPIs and the quantum sweep
//! - **`source`**: Text job-list parsing
//! - **`report`**: Trace table, Gantt chart, and summary rendering
//! - **`validation`**: Job-list and run-configuration checks
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Cormen et al. (2001), "Introduction to Algorithms", 2nd ed., Ch. 19

pub mod dispatching;
pub mod heap;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod source;
pub mod validation;
