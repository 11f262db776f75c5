//! In-progress grade entry for one student.
//!
//! # Responsibility
//! - Collect validated subject entries in insertion order.
//! - Finalize the session into a `StudentRecord`.
//!
//! # Invariants
//! - A rejected `add_subject` leaves the subject list unchanged.
//! - `finalize` never mutates the subject list.
//! - Insertion order affects display only, never the GPA.

use crate::model::grade::{SubjectEntry, ValidationError};
use crate::model::record::{compute_gpa, StudentRecord};
use log::debug;

/// Subject list owned by one entry session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeBook {
    subjects: Vec<SubjectEntry>,
}

impl GradeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends one subject.
    ///
    /// # Errors
    /// - `EmptySubjectName`, `UnknownGrade` or `InvalidCredits` on bad input.
    pub fn add_subject(
        &mut self,
        name: &str,
        grade: &str,
        credits: f64,
    ) -> Result<(), ValidationError> {
        let entry = SubjectEntry::new(name, grade, credits)?;
        self.subjects.push(entry);
        debug!(
            "event=subject_add module=gradebook status=ok count={}",
            self.subjects.len()
        );
        Ok(())
    }

    /// Drops every subject. Calling it on an empty book is a no-op.
    pub fn reset(&mut self) {
        self.subjects.clear();
    }

    pub fn subjects(&self) -> &[SubjectEntry] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn total_credits(&self) -> f64 {
        self.subjects.iter().map(|entry| entry.credits).sum()
    }

    /// Running GPA of the current subjects.
    pub fn gpa(&self) -> Result<f64, ValidationError> {
        compute_gpa(&self.subjects)
    }

    /// Builds the finished record for `name` / `reg_no`.
    ///
    /// # Errors
    /// - `EmptyStudentName`, `EmptyRegNo` or `InvalidRegNo` for bad identity input.
    /// - `NoSubjects` when nothing was added.
    pub fn finalize(&self, name: &str, reg_no: &str) -> Result<StudentRecord, ValidationError> {
        let record = StudentRecord::new(name, reg_no, self.subjects.clone())?;
        debug!(
            "event=gradebook_finalize module=gradebook status=ok reg_no={} subjects={}",
            record.reg_no,
            record.subjects.len()
        );
        Ok(record)
    }
}
