//! Input validation for simulation runs.
//!
//! Checks job lists and run configuration before simulating. Detects:
//! - Jobs with empty or duplicate names
//! - A zero quantum (a slice that never makes progress)
//! - A tick horizon too small to hold the whole run

use std::collections::HashSet;
use std::fmt;

use crate::dispatching::SimulationConfig;
use crate::models::{JobSet, Ticks};

/// Validation result.
pub type ValidationResult<T = ()> = Result<T, Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A job has an empty name.
    EmptyName,
    /// Two jobs share the same name.
    DuplicateName,
    /// The run configuration is unusable (e.g., zero quantum).
    InvalidConfig,
    /// The tick horizon cannot hold the full run.
    HorizonTooSmall,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the job list.
///
/// Checks:
/// 1. Every job has a non-empty name
/// 2. No two jobs share a name
pub fn validate_jobs(jobs: &JobSet) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (index, job) in jobs.jobs.iter().enumerate() {
        if job.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Job #{} has an empty name", index + 1),
            ));
        } else if !names.insert(job.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate job name: {}", job.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a run configuration against the job list it will simulate.
///
/// Checks:
/// 1. The configuration itself is valid (`SimulationConfig::validate`)
/// 2. A configured horizon covers the worst-case end time,
///    `max(arrival) + sum(execution)`
pub fn validate_run(jobs: &JobSet, config: &SimulationConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if let Err(message) = config.validate() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            message,
        ));
    }

    if let Some(horizon) = config.horizon {
        let needed = worst_case_end(jobs);
        if needed > horizon {
            errors.push(ValidationError::new(
                ValidationErrorKind::HorizonTooSmall,
                format!("Run may need {needed} ticks but the horizon is {horizon}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Latest tick at which the final job can complete.
pub fn worst_case_end(jobs: &JobSet) -> Ticks {
    let last_arrival = jobs
        .jobs
        .iter()
        .map(|j| j.arrival_time)
        .max()
        .unwrap_or(0);
    last_arrival.saturating_add(jobs.total_work())
}
