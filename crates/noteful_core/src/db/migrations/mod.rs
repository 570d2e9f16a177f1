//! Versioned schema migrations.
//!
//! # Responsibility
//! - Keep the ordered list of schema steps shipped with this binary.
//! - Bring a connection from its recorded `PRAGMA user_version` to the latest
//!   step, one transaction per step.
//!
//! # Invariants
//! - Step versions start at 1 and increase by exactly 1.
//! - A step's SQL and its `user_version` bump commit together.
//! - A database recorded at a newer version than this binary is refused.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// One schema step.
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "init",
        sql: include_str!("0001_init.sql"),
    },
    SchemaStep {
        version: 2,
        name: "notes_fts",
        sql: include_str!("0002_notes_fts.sql"),
    },
];

/// Schema version this binary writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Runs every step newer than the connection's recorded version.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let recorded = recorded_version(conn)?;
    let latest = latest_version();
    if recorded > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: recorded,
            latest_supported: latest,
        });
    }

    for step in pending_steps(recorded) {
        let tx = conn.transaction()?;
        tx.execute_batch(step.sql)?;
        // PRAGMA does not accept bound parameters.
        tx.execute_batch(&format!("PRAGMA user_version = {};", step.version))?;
        tx.commit()?;
        info!(
            "event=db_migrate module=db status=ok version={} step={}",
            step.version, step.name
        );
    }
    Ok(())
}

fn pending_steps(recorded: u32) -> impl Iterator<Item = &'static SchemaStep> {
    SCHEMA_STEPS.iter().filter(move |step| step.version > recorded)
}

fn recorded_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}
