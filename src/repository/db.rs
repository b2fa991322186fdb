//! Database Connection and Setup
//!
//! Opens the SQLite file backing the key-value store and runs migrations.

use rusqlite::Connection;
use std::path::Path;

use crate::domain::{DomainError, DomainResult};

/// Open (or create) the database at `db_path` and bring the schema up to date.
/// `:memory:` opens a private in-memory database.
pub fn init_db(db_path: &Path) -> DomainResult<Connection> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && db_path != Path::new(":memory:") {
            std::fs::create_dir_all(parent).map_err(|e| {
                DomainError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
    }

    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Storage(format!("Failed to open db: {}", e)))?;

    run_migrations(&conn)?;
    log::info!("Database ready at {}", db_path.display());

    Ok(conn)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(names) = stmt.query_map([], |row| row.get::<_, String>(1)) else {
        return false;
    };
    let found = names.flatten().any(|name| name == column);
    found
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value BLOB NOT NULL
        )",
        [],
    )
    .map_err(|e| DomainError::Storage(e.to_string()))?;

    // Write timestamps were added after the first schema
    if !column_exists(conn, "kv_store", "updated_at") {
        conn.execute(
            "ALTER TABLE kv_store ADD COLUMN updated_at INTEGER NOT NULL DEFAULT 0",
            [],
        )
        .map_err(|e| DomainError::Storage(format!("Failed to add updated_at: {}", e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_idempotent() {
        let conn = init_db(Path::new(":memory:")).expect("Failed to init test DB");
        run_migrations(&conn).expect("Second migration run failed");
        assert!(column_exists(&conn, "kv_store", "updated_at"));
        assert!(!column_exists(&conn, "kv_store", "missing"));
    }

    #[test]
    fn test_column_exists_on_unknown_table() {
        let conn = init_db(Path::new(":memory:")).expect("Failed to init test DB");
        assert!(column_exists(&conn, "kv_store", "key"));
        assert!(!column_exists(&conn, "no_such_table", "key"));
    }

    #[test]
    fn test_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("grocery.db");
        init_db(&path).expect("Failed to init file DB");
        assert!(path.exists());
    }
}
