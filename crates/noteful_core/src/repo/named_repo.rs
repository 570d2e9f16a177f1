//! Folder/tag repository contract and SQLite implementation.
//!
//! Folders and tags share one storage shape, so one implementation serves
//! both, parameterized by [`Collection`].
//!
//! # Invariants
//! - Names are unique per collection; violations map to `Duplicate { field: "name" }`.
//! - Deleting a record never touches notes that reference it.

use crate::model::id::DocId;
use crate::model::named::{Collection, NamedRecord};
use crate::repo::{map_unique_violation, now_epoch_ms, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

/// Repository interface for folders and tags.
pub trait NamedRecordRepository {
    fn collection(&self) -> Collection;
    /// Lists every record sorted by name.
    fn list(&self) -> RepoResult<Vec<NamedRecord>>;
    fn get(&self, id: &DocId) -> RepoResult<Option<NamedRecord>>;
    fn create(&self, name: &str) -> RepoResult<NamedRecord>;
    /// Renames a record. Returns `None` when no record has this id.
    fn rename(&self, id: &DocId, name: &str) -> RepoResult<Option<NamedRecord>>;
    /// Returns whether a record was removed.
    fn delete(&self, id: &DocId) -> RepoResult<bool>;
}

/// SQLite-backed repository for one named-record collection.
pub struct SqliteNamedRecordRepository<'conn> {
    conn: &'conn Connection,
    collection: Collection,
}

impl<'conn> SqliteNamedRecordRepository<'conn> {
    pub fn new(conn: &'conn Connection, collection: Collection) -> Self {
        Self { conn, collection }
    }

    pub fn folders(conn: &'conn Connection) -> Self {
        Self::new(conn, Collection::Folders)
    }

    pub fn tags(conn: &'conn Connection) -> Self {
        Self::new(conn, Collection::Tags)
    }

    fn table(&self) -> &'static str {
        self.collection.table()
    }
}

impl NamedRecordRepository for SqliteNamedRecordRepository<'_> {
    fn collection(&self) -> Collection {
        self.collection
    }

    fn list(&self) -> RepoResult<Vec<NamedRecord>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT id, name FROM {} ORDER BY name ASC;",
            self.table()
        ))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_named_row(row)?);
        }
        Ok(records)
    }

    fn get(&self, id: &DocId) -> RepoResult<Option<NamedRecord>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT id, name FROM {} WHERE id = ?1;",
            self.table()
        ))?;
        let mut rows = stmt.query([id.as_str()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_named_row(row)?)),
            None => Ok(None),
        }
    }

    fn create(&self, name: &str) -> RepoResult<NamedRecord> {
        let id = DocId::generate();
        self.conn
            .execute(
                &format!(
                    "INSERT INTO {} (id, name, created_at) VALUES (?1, ?2, ?3);",
                    self.table()
                ),
                params![id.as_str(), name, now_epoch_ms()],
            )
            .map_err(|err| map_unique_violation(err, "name"))?;

        self.get(&id)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "created {} `{id}` not found in read-back",
                self.collection.label()
            ))
        })
    }

    fn rename(&self, id: &DocId, name: &str) -> RepoResult<Option<NamedRecord>> {
        let changed = self
            .conn
            .execute(
                &format!("UPDATE {} SET name = ?2 WHERE id = ?1;", self.table()),
                params![id.as_str(), name],
            )
            .map_err(|err| map_unique_violation(err, "name"))?;
        if changed == 0 {
            return Ok(None);
        }
        self.get(id)
    }

    fn delete(&self, id: &DocId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", self.table()),
            [id.as_str()],
        )?;
        Ok(changed > 0)
    }
}

fn parse_named_row(row: &Row<'_>) -> RepoResult<NamedRecord> {
    Ok(NamedRecord {
        id: DocId::from_stored(row.get("id")?),
        name: row.get("name")?,
    })
}
