//! Full-text search support.
//!
//! # Responsibility
//! - Turn user search text into safe SQLite FTS5 match expressions.
//! - Define how relevance is scored and selected.
//!
//! # See also
//! - `db/migrations/0002_notes_fts.sql`

pub mod fts;
