use noteful_core::db::migrations::latest_version;
use noteful_core::db::{open_db, open_db_in_memory, Database, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in ["folders", "tags", "notes", "note_tags", "notes_fts"] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noteful.sqlite3");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "notes");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn upgrade_from_version_one_indexes_existing_notes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upgrade.sqlite3");

    let conn = open_db(&path).unwrap();
    conn.execute_batch(
        "DROP TRIGGER notes_fts_after_insert;
         DROP TRIGGER notes_fts_after_update;
         DROP TRIGGER notes_fts_after_delete;
         DROP TABLE notes_fts;
         INSERT INTO notes (id, title, content, created_at)
         VALUES ('aaaaaaaaaaaaaaaaaaaaaaaa', 'legacy', 'written before search existed', 0);
         PRAGMA user_version = 1;",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let hits: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM notes_fts WHERE notes_fts MATCH 'search';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(hits, 1);
}

#[test]
fn database_handle_persists_across_close_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noteful.sqlite3");

    let db = Database::open(&path).unwrap();
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO tags (id, name, created_at) VALUES ('aaaaaaaaaaaaaaaaaaaaaaaa', 'kept', 0);",
            [],
        )
        .map_err(DbError::from)
    })
    .unwrap();
    db.close().unwrap();

    let reopened = Database::open(&path).unwrap();
    let count: i64 = reopened
        .with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM tags;", [], |row| row.get(0))
                .map_err(DbError::from)
        })
        .unwrap();
    assert_eq!(count, 1);
    reopened.close().unwrap();
}

#[test]
fn close_with_live_clones_is_deferred() {
    let db = Database::open_in_memory().unwrap();
    let clone = db.clone();

    db.close().unwrap();

    let version = clone
        .with_conn(|conn| Ok::<u32, DbError>(schema_version(conn)))
        .unwrap();
    assert_eq!(version, latest_version());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
