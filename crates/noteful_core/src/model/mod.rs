//! Domain model for notes and the records they reference.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own identifier syntax rules.
//!
//! # Invariants
//! - Every record is identified by a stable `DocId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod id;
pub mod named;
pub mod note;
