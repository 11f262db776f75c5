//! Core domain logic for the gradebook.
//! This crate is the single source of truth for grading invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, GradebookConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::grade::{format_number, GradeLetter, SubjectEntry, ValidationError};
pub use model::record::{compute_gpa, round_half_even_2, RecordId, StudentRecord};
pub use repo::record_repo::{
    FileRecordRepository, RecordRepository, RecordScan, RejectedEntry, StoreError, StoreResult,
};
pub use service::gradebook::GradeBook;
pub use service::record_service::{
    render_record_text, ComparisonSet, GpaPoint, RecordService, SkippedRecord,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
