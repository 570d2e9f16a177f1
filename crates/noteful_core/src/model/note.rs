//! Note domain model.
//!
//! # Responsibility
//! - Define the read model returned to callers (tags already expanded).
//! - Define the validated write input shared by create and update.
//!
//! # Invariants
//! - `title` is never empty on a stored note.
//! - `tags` holds each tag at most once.

use crate::model::id::DocId;
use crate::model::named::Tag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Note as returned by reads, with tag references populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: DocId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Server-assigned creation time.
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<DocId>,
    /// Resolved tags; references to tags that no longer exist are dropped.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Text relevance, present only on full-text search results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Validated note fields handed to the repository.
///
/// For updates, `folder_id: None` keeps the stored folder untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<DocId>,
    pub tags: Vec<DocId>,
}
