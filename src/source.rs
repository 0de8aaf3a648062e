//! Job list input.
//!
//! Reads whitespace-separated job lines of the form
//!
//! ```text
//! <name> <execution time> <arrival time>
//! ```
//!
//! Fields after the third are ignored. Lines that do not start with a name
//! followed by two non-negative integers are skipped. Process ids follow
//! the order of the accepted lines.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::models::{JobSet, JobSpec, Ticks};

/// Error loading a job list.
#[derive(Debug)]
pub enum SourceError {
    /// The input file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The input contained no valid job lines.
    Empty,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            SourceError::Empty => f.write_str("input contains no valid job lines"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io { source, .. } => Some(source),
            SourceError::Empty => None,
        }
    }
}

/// Parses a job list from text.
pub fn parse_jobs(text: &str) -> Result<JobSet, SourceError> {
    let mut jobs = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(job) => jobs.push(job),
            None => warn!(line = line_no + 1, content = line, "skipping malformed job line"),
        }
    }

    if jobs.is_empty() {
        return Err(SourceError::Empty);
    }
    debug!(jobs = jobs.len(), "parsed job list");
    Ok(JobSet::new(jobs))
}

/// Reads and parses a job list file.
pub fn load_jobs(path: impl AsRef<Path>) -> Result<JobSet, SourceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_jobs(&text)
}

fn parse_line(line: &str) -> Option<JobSpec> {
    let mut fields = line.split_whitespace();
    let name = fields.next()?;
    let execution_time: Ticks = fields.next()?.parse().ok()?;
    let arrival_time: Ticks = fields.next()?.parse().ok()?;
    Some(JobSpec::new(name, execution_time, arrival_time))
}
