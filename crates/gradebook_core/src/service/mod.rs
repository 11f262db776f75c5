//! Core use-case services.
//!
//! # Responsibility
//! - Hold the in-progress grade entry session (`GradeBook`).
//! - Orchestrate repository calls into export and comparison use cases.

pub mod gradebook;
pub mod record_service;
