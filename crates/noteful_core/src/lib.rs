//! Core domain logic for Noteful.
//! This crate is the single source of truth for note/folder/tag invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod search;
pub mod service;

pub use db::{Database, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::id::{is_valid_id, DocId};
pub use model::named::{Collection, Folder, NamedRecord, Tag};
pub use model::note::{Note, NoteInput};
pub use query::{
    build_note_query, NoteFilter, NoteListParams, NoteProjection, NoteQuery, NoteSort, TextMatch,
};
pub use repo::named_repo::{NamedRecordRepository, SqliteNamedRecordRepository};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::{RepoError, RepoResult};
pub use service::named_service::{NamedPayload, NamedRecordService};
pub use service::note_service::{NotePayload, NoteService};
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
