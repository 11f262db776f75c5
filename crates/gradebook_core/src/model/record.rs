//! Finalized student records and GPA arithmetic.
//!
//! # Responsibility
//! - Define the persisted `StudentRecord` shape and its `RecordId` key.
//! - Compute the credit-weighted GPA with a fixed rounding rule.
//!
//! # Invariants
//! - `reg_no` is non-empty and usable as a single file name.
//! - `subjects` is non-empty for every record built by `StudentRecord::new`.
//! - `gpa` uses round-half-to-even at two decimals.

use crate::model::grade::{SubjectEntry, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

// Path separators, control characters (NUL included) and a leading dot
// would escape or hide the record file.
static UNSAFE_REG_NO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[/\\\x00-\x1f\x7f]|^\.").expect("valid reg_no regex"));

const MAX_GPA: f64 = 4.0;

// Scaled values this close to a `.5` boundary count as ties.
const TIE_EPSILON: f64 = 1e-9;

/// Identifier of a persisted record, derived from its `reg_no`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Validates `reg_no` and wraps it as an id.
    pub fn new(reg_no: &str) -> Result<Self, ValidationError> {
        Ok(Self(normalize_reg_no(reg_no)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One finalized GPA computation for a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    #[serde(alias = "regNo")]
    pub reg_no: String,
    pub gpa: f64,
    pub subjects: Vec<SubjectEntry>,
}

impl StudentRecord {
    /// Builds a record and computes its GPA from `subjects`.
    ///
    /// # Errors
    /// - `EmptyStudentName`, `EmptyRegNo` or `InvalidRegNo` for bad identity fields.
    /// - `NoSubjects` when `subjects` is empty.
    pub fn new(
        name: &str,
        reg_no: &str,
        subjects: Vec<SubjectEntry>,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyStudentName);
        }
        let reg_no = normalize_reg_no(reg_no)?;
        let gpa = compute_gpa(&subjects)?;

        Ok(Self {
            name: name.to_string(),
            reg_no,
            gpa,
            subjects,
        })
    }

    /// Storage key for this record.
    pub fn id(&self) -> Result<RecordId, ValidationError> {
        RecordId::new(&self.reg_no)
    }

    /// Checks identity and subject invariants of a record built elsewhere
    /// (deserialized or assembled by hand).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyStudentName);
        }
        normalize_reg_no(&self.reg_no)?;
        if !(0.0..=MAX_GPA).contains(&self.gpa) {
            return Err(ValidationError::InvalidGpa(self.gpa));
        }
        if self.subjects.is_empty() {
            return Err(ValidationError::NoSubjects);
        }
        self.subjects.iter().try_for_each(SubjectEntry::validate)
    }
}

/// Computes `round(Σ points*credits / Σ credits, 2)`.
///
/// # Errors
/// - `NoSubjects` when `subjects` is empty.
/// - `InvalidCredits` when no subject carries positive, finite credits.
pub fn compute_gpa(subjects: &[SubjectEntry]) -> Result<f64, ValidationError> {
    if subjects.is_empty() {
        return Err(ValidationError::NoSubjects);
    }

    // Weights are scaled by the largest credit value so neither sum overflows.
    let max_credits = subjects
        .iter()
        .map(|entry| entry.credits)
        .fold(0.0_f64, f64::max);
    if !(max_credits.is_finite() && max_credits > 0.0) {
        return Err(ValidationError::InvalidCredits(max_credits));
    }

    let (weighted, weights) = subjects.iter().fold((0.0, 0.0), |(points, total), entry| {
        let weight = entry.credits / max_credits;
        (points + entry.grade.points() * weight, total + weight)
    });

    Ok(round_half_even_2(weighted / weights))
}

/// Rounds to two decimals, ties to even.
pub fn round_half_even_2(value: f64) -> f64 {
    let scaled = value * 100.0;
    let floor = scaled.floor();
    let rounded = if ((scaled - floor) - 0.5).abs() < TIE_EPSILON {
        if floor % 2.0 == 0.0 {
            floor
        } else {
            floor + 1.0
        }
    } else {
        scaled.round()
    };
    rounded / 100.0
}

fn normalize_reg_no(reg_no: &str) -> Result<String, ValidationError> {
    let trimmed = reg_no.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyRegNo);
    }
    if UNSAFE_REG_NO_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidRegNo(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}
