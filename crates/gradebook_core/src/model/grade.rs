//! Letter grades and subject entries.
//!
//! # Responsibility
//! - Map letter grades onto their fixed grade-point values.
//! - Validate user-provided subject input into `SubjectEntry` values.
//!
//! # Invariants
//! - The grade table is static and read-only.
//! - Grade parsing is exact after trimming (`"a"` is not `"A"`).
//! - Deserialized entries go through the same validation as new ones.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Letter grade with a fixed grade-point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradeLetter {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl GradeLetter {
    /// Every grade, best first.
    pub const ALL: [GradeLetter; 11] = [
        GradeLetter::A,
        GradeLetter::AMinus,
        GradeLetter::BPlus,
        GradeLetter::B,
        GradeLetter::BMinus,
        GradeLetter::CPlus,
        GradeLetter::C,
        GradeLetter::CMinus,
        GradeLetter::DPlus,
        GradeLetter::D,
        GradeLetter::F,
    ];

    /// Grade-point value used in the weighted average.
    pub fn points(self) -> f64 {
        match self {
            Self::A => 4.0,
            Self::AMinus => 3.7,
            Self::BPlus => 3.3,
            Self::B => 3.0,
            Self::BMinus => 2.7,
            Self::CPlus => 2.3,
            Self::C => 2.0,
            Self::CMinus => 1.7,
            Self::DPlus => 1.3,
            Self::D => 1.0,
            Self::F => 0.0,
        }
    }

    /// Display text, identical to the persisted form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl Display for GradeLetter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradeLetter {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|grade| grade.as_str() == trimmed)
            .ok_or_else(|| ValidationError::UnknownGrade(value.to_string()))
    }
}

/// Input validation failures for subjects and records.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptySubjectName,
    UnknownGrade(String),
    /// Credits must be finite and strictly positive.
    InvalidCredits(f64),
    EmptyStudentName,
    EmptyRegNo,
    /// `reg_no` is used as a file name; separators, control characters and a
    /// leading dot are refused.
    InvalidRegNo(String),
    NoSubjects,
    /// Stored GPA is not a finite number in `0.0..=4.0`.
    InvalidGpa(f64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySubjectName => write!(f, "subject name cannot be empty"),
            Self::UnknownGrade(value) => write!(
                f,
                "unknown grade `{value}`; expected one of A|A-|B+|B|B-|C+|C|C-|D+|D|F"
            ),
            Self::InvalidCredits(value) => {
                write!(f, "credits must be a positive number, got {value}")
            }
            Self::EmptyStudentName => write!(f, "student name cannot be empty"),
            Self::EmptyRegNo => write!(f, "registration number cannot be empty"),
            Self::InvalidRegNo(value) => write!(
                f,
                "invalid registration number `{value}`; it cannot contain `/`, `\\` or control characters, or start with `.`"
            ),
            Self::NoSubjects => write!(f, "add at least one subject"),
            Self::InvalidGpa(value) => write!(f, "gpa must be between 0.0 and 4.0, got {value}"),
        }
    }
}

impl Error for ValidationError {}

/// One graded subject inside a gradebook or record.
///
/// Serialized as `{subject, grade, credits}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SubjectEntryWire")]
pub struct SubjectEntry {
    #[serde(rename = "subject")]
    pub name: String,
    pub grade: GradeLetter,
    pub credits: f64,
}

impl SubjectEntry {
    /// Validates raw input into an entry.
    ///
    /// The name is stored trimmed.
    pub fn new(name: &str, grade: &str, credits: f64) -> Result<Self, ValidationError> {
        let grade = grade.parse::<GradeLetter>()?;
        Self::with_grade(name, grade, credits)
    }

    /// Same as [`SubjectEntry::new`] for an already parsed grade.
    pub fn with_grade(
        name: &str,
        grade: GradeLetter,
        credits: f64,
    ) -> Result<Self, ValidationError> {
        let entry = Self {
            name: name.trim().to_string(),
            grade,
            credits,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Checks name and credit invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptySubjectName);
        }
        if !(self.credits.is_finite() && self.credits > 0.0) {
            return Err(ValidationError::InvalidCredits(self.credits));
        }
        Ok(())
    }

    /// `points * credits` contribution to the weighted sum.
    pub fn weighted_points(&self) -> f64 {
        self.grade.points() * self.credits
    }
}

impl Display for SubjectEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} cr",
            self.name,
            self.grade,
            format_number(self.credits)
        )
    }
}

#[derive(Deserialize)]
struct SubjectEntryWire {
    subject: String,
    grade: GradeLetter,
    credits: f64,
}

impl TryFrom<SubjectEntryWire> for SubjectEntry {
    type Error = ValidationError;

    fn try_from(value: SubjectEntryWire) -> Result<Self, Self::Error> {
        let entry = Self {
            name: value.subject,
            grade: value.grade,
            credits: value.credits,
        };
        entry.validate()?;
        Ok(entry)
    }
}

/// Formats a number with at least one decimal place (`3` -> `3.0`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
