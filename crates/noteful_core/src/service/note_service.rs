//! Note use-case service.
//!
//! # Responsibility
//! - Validate note payloads and path identifiers.
//! - Build list queries and delegate persistence to a [`NoteRepository`].
//!
//! # Invariants
//! - Create/update require a non-empty `title`; update checks it before the id.
//! - Create rejects a malformed `folderId`; update ignores one and keeps the
//!   stored folder.
//! - Title, content and tags are replaced wholesale on update.

use crate::model::id::DocId;
use crate::model::note::{Note, NoteInput};
use crate::query::{build_note_query, NoteListParams};
use crate::repo::note_repo::NoteRepository;
use crate::service::{ServiceError, ServiceResult};
use log::info;
use serde::Deserialize;

/// Note fields as supplied by a caller, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists notes filtered by search term, folder and tag.
    pub fn list_notes(&self, params: &NoteListParams) -> ServiceResult<Vec<Note>> {
        let query = build_note_query(params);
        Ok(self.repo.list_notes(&query)?)
    }

    /// Gets one note. Fails on a malformed id, returns `None` when absent.
    pub fn get_note(&self, id: &str) -> ServiceResult<Option<Note>> {
        let id = parse_path_id(id)?;
        Ok(self.repo.get_note(&id)?)
    }

    /// Creates one note.
    pub fn create_note(&self, payload: NotePayload) -> ServiceResult<Note> {
        let title = require_title(payload.title)?;
        let folder_id = match payload.folder_id.as_deref() {
            None | Some("") => None,
            Some(value) => Some(
                DocId::parse(value).ok_or(ServiceError::InvalidIdentifier { field: "folderId" })?,
            ),
        };
        let input = NoteInput {
            title,
            content: payload.content,
            folder_id,
            tags: parse_tag_ids(payload.tags)?,
        };

        let note = self.repo.create_note(&input)?;
        info!(
            "event=note_create module=service status=ok note_id={} tag_count={}",
            note.id,
            note.tags.len()
        );
        Ok(note)
    }

    /// Updates one note. Returns `None` when no note has this id.
    pub fn update_note(&self, id: &str, payload: NotePayload) -> ServiceResult<Option<Note>> {
        let title = require_title(payload.title)?;
        let id = parse_path_id(id)?;
        let input = NoteInput {
            title,
            content: payload.content,
            folder_id: payload.folder_id.as_deref().and_then(DocId::parse),
            tags: parse_tag_ids(payload.tags)?,
        };

        let updated = self.repo.update_note(&id, &input)?;
        if updated.is_some() {
            info!("event=note_update module=service status=ok note_id={id}");
        }
        Ok(updated)
    }

    /// Deletes one note. Returns whether a note was removed.
    ///
    /// A malformed id cannot name a stored note, so it reports `false`.
    pub fn delete_note(&self, id: &str) -> ServiceResult<bool> {
        let Some(id) = DocId::parse(id) else {
            return Ok(false);
        };

        let deleted = self.repo.delete_note(&id)?;
        if deleted {
            info!("event=note_delete module=service status=ok note_id={id}");
        }
        Ok(deleted)
    }
}

pub(crate) fn parse_path_id(id: &str) -> ServiceResult<DocId> {
    DocId::parse(id).ok_or(ServiceError::InvalidIdentifier { field: "id" })
}

fn require_title(title: Option<String>) -> ServiceResult<String> {
    title
        .filter(|title| !title.is_empty())
        .ok_or(ServiceError::MissingRequiredField { field: "title" })
}

fn parse_tag_ids(tags: Option<Vec<String>>) -> ServiceResult<Vec<DocId>> {
    tags.unwrap_or_default()
        .into_iter()
        .map(|tag| DocId::parse(&tag).ok_or(ServiceError::InvalidIdentifier { field: "tags" }))
        .collect()
}
