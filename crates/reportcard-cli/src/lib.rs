//! # Report Card CLI
//!
//! Offline report generation against a JSON fixture instead of the live data
//! store, and template inspection.
//!
//! ## Usage
//!
//! ```ignore
//! use reportcard_cli::sink::FileSink;
//!
//! let orchestrator = BatchOrchestrator::new(generator, config)
//!     .with_sink(Arc::new(FileSink::new("out")));
//! ```

pub mod sink;

use reportcard_models::StudentId;

/// Splits a comma separated id list, ignoring blanks.
pub fn parse_student_ids(list: &str) -> Vec<StudentId> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(StudentId::from)
        .collect()
}
