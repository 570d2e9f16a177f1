//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Translate a [`NoteQuery`] into one SQL statement.
//! - Expand tag references into full tag records after the primary fetch.
//! - Keep a note row and its tag links consistent within one transaction.
//!
//! # Invariants
//! - Reads return `{id, title, content, created, folderId, tags}` only, plus
//!   `score` when the query projects relevance.
//! - Tag links pointing at deleted tags are kept but skipped on read.
//! - Updates keep `folder_id` when the input carries none.

use crate::model::id::DocId;
use crate::model::named::Tag;
use crate::model::note::{Note, NoteInput};
use crate::query::{NoteQuery, NoteSort, TextMatch};
use crate::repo::{
    map_unique_violation, now_epoch_ms, timestamp_from_epoch_ms, RepoError, RepoResult,
};
use crate::search::fts::{NOTES_FTS_TABLE, RELEVANCE_SCORE_SQL};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::BTreeSet;

const NOTE_COLUMNS_SQL: &str = "SELECT
    notes.id AS id,
    notes.title AS title,
    notes.content AS content,
    notes.folder_id AS folder_id,
    notes.created_at AS created_at";

const CREATION_ORDER_SQL: &str = "notes.created_at ASC, notes.rowid ASC";

/// Repository interface for note persistence.
pub trait NoteRepository {
    /// Lists notes matching the query's filter, in the query's sort order.
    fn list_notes(&self, query: &NoteQuery) -> RepoResult<Vec<Note>>;
    /// Gets one note by id.
    fn get_note(&self, id: &DocId) -> RepoResult<Option<Note>>;
    /// Persists a new note with a generated id and creation time.
    fn create_note(&self, input: &NoteInput) -> RepoResult<Note>;
    /// Replaces title, content and tags; replaces the folder only when given.
    ///
    /// Returns `None` when no note has this id.
    fn update_note(&self, id: &DocId, input: &NoteInput) -> RepoResult<Option<Note>>;
    /// Removes one note. Returns whether a note was removed.
    fn delete_note(&self, id: &DocId) -> RepoResult<bool>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository over a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn list_notes(&self, query: &NoteQuery) -> RepoResult<Vec<Note>> {
        let expression = match &query.filter.text_match {
            Some(TextMatch::Expression(expression)) => Some(expression),
            Some(TextMatch::Nothing) | None => None,
        };
        // Relevance only exists when the FTS table takes part in the query.
        let ranked = expression.is_some();
        let with_score = ranked && query.projection.relevance_score;

        let mut sql = String::from(NOTE_COLUMNS_SQL);
        if with_score {
            sql.push_str(&format!(", {RELEVANCE_SCORE_SQL} AS score"));
        }
        sql.push_str(" FROM notes");
        if ranked {
            sql.push_str(&format!(
                " JOIN {NOTES_FTS_TABLE} ON {NOTES_FTS_TABLE}.note_id = notes.id"
            ));
        }
        sql.push_str(" WHERE 1 = 1");

        let mut bind_values: Vec<Value> = Vec::new();
        if let Some(expression) = expression {
            sql.push_str(&format!(" AND {NOTES_FTS_TABLE} MATCH ?"));
            bind_values.push(Value::Text(expression.clone()));
        }
        if query.filter.text_match == Some(TextMatch::Nothing) {
            sql.push_str(" AND 0");
        }
        if let Some(folder_id) = query.filter.folder_id.as_ref() {
            sql.push_str(" AND notes.folder_id = ?");
            bind_values.push(Value::Text(folder_id.clone()));
        }
        if let Some(tag_id) = query.filter.tag_id.as_ref() {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1
                    FROM note_tags
                    WHERE note_tags.note_id = notes.id
                      AND note_tags.tag_id = ?
                )",
            );
            bind_values.push(Value::Text(tag_id.clone()));
        }

        match query.sort {
            NoteSort::RelevanceDescending if ranked => sql.push_str(&format!(
                " ORDER BY {RELEVANCE_SCORE_SQL} DESC, {CREATION_ORDER_SQL}"
            )),
            _ => sql.push_str(&format!(" ORDER BY {CREATION_ORDER_SQL}")),
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row, with_score)?);
        }

        populate_tags(self.conn, &mut notes)?;
        Ok(notes)
    }

    fn get_note(&self, id: &DocId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{NOTE_COLUMNS_SQL} FROM notes WHERE notes.id = ?1;"))?;
        let mut rows = stmt.query([id.as_str()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let mut note = parse_note_row(row, false)?;
        note.tags = load_tags_for_note(self.conn, &note.id)?;
        Ok(Some(note))
    }

    fn create_note(&self, input: &NoteInput) -> RepoResult<Note> {
        let id = DocId::generate();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO notes (id, title, content, folder_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                id.as_str(),
                input.title.as_str(),
                input.content.as_deref(),
                input.folder_id.as_ref().map(DocId::as_str),
                now_epoch_ms(),
            ],
        )
        .map_err(|err| map_unique_violation(err, "id"))?;
        replace_note_tags(&tx, &id, &input.tags)?;
        tx.commit()?;

        self.get_note(&id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("created note `{id}` not found in read-back"))
        })
    }

    fn update_note(&self, id: &DocId, input: &NoteInput) -> RepoResult<Option<Note>> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE notes
             SET
                title = ?2,
                content = ?3,
                folder_id = coalesce(?4, folder_id)
             WHERE id = ?1;",
            params![
                id.as_str(),
                input.title.as_str(),
                input.content.as_deref(),
                input.folder_id.as_ref().map(DocId::as_str),
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }

        replace_note_tags(&tx, id, &input.tags)?;
        tx.commit()?;

        self.get_note(id)
    }

    fn delete_note(&self, id: &DocId) -> RepoResult<bool> {
        // note_tags rows go with the note via ON DELETE CASCADE.
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.as_str()])?;
        Ok(changed > 0)
    }
}

fn parse_note_row(row: &Row<'_>, with_score: bool) -> RepoResult<Note> {
    let folder_id: Option<String> = row.get("folder_id")?;
    let score = if with_score {
        Some(row.get::<_, f64>("score")?)
    } else {
        None
    };

    Ok(Note {
        id: DocId::from_stored(row.get("id")?),
        title: row.get("title")?,
        content: row.get("content")?,
        created: timestamp_from_epoch_ms(row.get("created_at")?)?,
        folder_id: folder_id.map(DocId::from_stored),
        tags: Vec::new(),
        score,
    })
}

/// Expands each note's tag references into tag records.
fn populate_tags(conn: &Connection, notes: &mut [Note]) -> RepoResult<()> {
    for note in notes.iter_mut() {
        note.tags = load_tags_for_note(conn, &note.id)?;
    }
    Ok(())
}

fn load_tags_for_note(conn: &Connection, note_id: &DocId) -> RepoResult<Vec<Tag>> {
    let mut stmt = conn.prepare_cached(
        "SELECT tags.id, tags.name
         FROM note_tags
         INNER JOIN tags ON tags.id = note_tags.tag_id
         WHERE note_tags.note_id = ?1
         ORDER BY tags.name ASC;",
    )?;
    let mut rows = stmt.query([note_id.as_str()])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(Tag {
            id: DocId::from_stored(row.get(0)?),
            name: row.get(1)?,
        });
    }
    Ok(tags)
}

fn replace_note_tags(conn: &Connection, note_id: &DocId, tags: &[DocId]) -> RepoResult<()> {
    conn.execute(
        "DELETE FROM note_tags WHERE note_id = ?1;",
        [note_id.as_str()],
    )?;

    let unique = tags.iter().collect::<BTreeSet<_>>();
    for tag_id in unique {
        conn.execute(
            "INSERT INTO note_tags (note_id, tag_id) VALUES (?1, ?2);",
            params![note_id.as_str(), tag_id.as_str()],
        )?;
    }
    Ok(())
}
