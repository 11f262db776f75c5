//! Record use-case service.
//!
//! # Responsibility
//! - Expose save/list/load over any `RecordRepository`.
//! - Render and export the plain-text record view.
//! - Collect `(name, gpa)` pairs for the comparison chart.
//!
//! # Invariants
//! - One unreadable record never aborts a comparison listing.
//! - Export output is byte-for-byte `render_record_text`.

use crate::model::grade::format_number;
use crate::model::record::{RecordId, StudentRecord};
use crate::repo::record_repo::{RecordRepository, StoreError, StoreResult};
use log::{info, warn};
use std::path::Path;

/// One bar of the comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GpaPoint {
    pub name: String,
    pub gpa: f64,
}

/// A record left out of a comparison because it failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Record id, or the file name when no id could be derived.
    pub entry: String,
    pub reason: String,
}

/// Comparison series plus the records that could not be read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonSet {
    /// Points in record id order.
    pub points: Vec<GpaPoint>,
    pub skipped: Vec<SkippedRecord>,
}

impl ComparisonSet {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Record service facade over repository implementations.
pub struct RecordService<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> RecordService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Persists `record`, replacing any record with the same `reg_no`.
    pub fn save(&self, record: &StudentRecord) -> StoreResult<()> {
        self.repo.save(record)
    }

    pub fn list(&self) -> StoreResult<Vec<RecordId>> {
        self.repo.list()
    }

    pub fn load(&self, id: &RecordId) -> StoreResult<StudentRecord> {
        self.repo.load(id)
    }

    /// Writes the plain-text view of `record` to `destination`.
    pub fn export_text(&self, record: &StudentRecord, destination: &Path) -> StoreResult<()> {
        std::fs::write(destination, render_record_text(record))
            .map_err(|err| StoreError::io(destination, err))?;
        info!(
            "event=record_export module=service status=ok reg_no={}",
            record.reg_no
        );
        Ok(())
    }

    /// Loads every record and extracts `(name, gpa)`.
    ///
    /// Records that fail to load, and stored files that cannot be addressed
    /// as records, are reported in `skipped`; only a listing failure is
    /// returned as an error.
    pub fn all_for_comparison(&self) -> StoreResult<ComparisonSet> {
        let scan = self.repo.scan()?;
        let mut set = ComparisonSet::default();
        set.skipped
            .extend(scan.rejected.into_iter().map(|rejected| SkippedRecord {
                entry: rejected.file_name,
                reason: rejected.reason,
            }));

        for id in scan.ids {
            match self.repo.load(&id) {
                Ok(record) => set.points.push(GpaPoint {
                    name: record.name,
                    gpa: record.gpa,
                }),
                Err(err) => {
                    warn!(
                        "event=record_compare module=service status=skipped reg_no={} error={}",
                        id, err
                    );
                    set.skipped.push(SkippedRecord {
                        entry: id.to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            "event=record_compare module=service status=ok points={} skipped={}",
            set.points.len(),
            set.skipped.len()
        );
        Ok(set)
    }
}

/// Human-readable record view used by `show` and `export_text`.
pub fn render_record_text(record: &StudentRecord) -> String {
    let mut out = format!(
        "Name: {}\nReg No: {}\nGPA: {}\n\nSubjects:\n",
        record.name,
        record.reg_no,
        format_number(record.gpa)
    );
    for entry in &record.subjects {
        out.push_str(&format!(
            " - {}: {} ({} cr)\n",
            entry.name,
            entry.grade,
            format_number(entry.credits)
        ));
    }
    out
}
