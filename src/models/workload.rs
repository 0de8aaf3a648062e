//! Synthetic workload generation.
//!
//! Produces reproducible job sets for benchmarks and property tests. Each
//! tick independently spawns a job with probability `p_arrival`; a spawned
//! job is short with probability `p_short` and long otherwise.

use rand::prelude::*;

use super::{JobSet, JobSpec, Ticks};

/// Generates a Bernoulli-arrival job set.
///
/// Jobs are named `P1`, `P2`, … in arrival order.
pub fn bernoulli_jobs(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
    seed: u64,
) -> JobSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let execution_time = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };
            jobs.push(JobSpec::new(
                format!("P{}", jobs.len() + 1),
                execution_time,
                t,
            ));
        }
    }

    JobSet::new(jobs)
}
