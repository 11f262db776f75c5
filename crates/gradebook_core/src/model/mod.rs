//! Domain model for grades, subject entries and student records.
//!
//! # Responsibility
//! - Define the canonical data structures used by gradebook logic.
//! - Own every validation rule so service and storage layers share them.
//!
//! # Invariants
//! - A `SubjectEntry` always has a non-empty name and positive, finite credits.
//! - A `StudentRecord` is keyed by a `reg_no` usable as a single file name.
//! - GPA values are rounded half-to-even at two decimals.

pub mod grade;
pub mod record;
