//! Priority function, run configuration, and the dispatch engine.
//!
//! Implements a dynamically-reprioritized round-robin discipline: the ready
//! process with the lowest priority value runs for one quantum, and an
//! unfinished process is requeued with a priority recomputed from its
//! remaining work relative to the longest job in the set.
//!
//! # Usage
//!
//! ```
//! use u_quantum::dispatching::{simulate, SimulationConfig};
//! use u_quantum::models::{JobSet, JobSpec};
//!
//! let jobs = JobSet::new(vec![JobSpec::new("P1", 5, 0), JobSpec::new("P2", 3, 1)]);
//! let outcome = simulate(&jobs, &SimulationConfig::default().with_quantum(2)).unwrap();
//! assert_eq!(outcome.end_time(), 8);
//! ```

mod config;
mod context;
mod engine;
mod priority;

pub use config::SimulationConfig;
pub use context::SimulationRun;
pub use engine::{simulate, DispatchEngine, EngineState, StepEvent};
pub use priority::{is_higher_priority, priority_value};
