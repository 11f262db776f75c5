//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract for finalized student records.
//! - Keep file layout and JSON details out of service code.
//!
//! # Invariants
//! - Write paths validate a record before touching disk.
//! - Read paths reject malformed documents instead of masking them.

pub mod record_repo;
