//! SQLite-backed key-value store for non-browser targets.
//!
//! # Responsibility
//! - Persist string entries in the `kv_entries` table.
//! - Map SQLite failure codes onto the store's named conditions.
//!
//! # Invariants
//! - The connection must come from `db::open_db*` so migrations are applied.
//! - `set_item` is an upsert; no partial rows are ever written.

use super::port::{KeyValueStore, StoreError, StoreResult};
use crate::db::DbError;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

/// Key-value store over a borrowed SQLite connection.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(map_sqlite_error)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![key, value],
            )
            .map(|_| ())
            .map_err(map_sqlite_error)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])
            .map(|_| ())
            .map_err(map_sqlite_error)
    }

    fn entries(&self) -> StoreResult<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM kv_entries ORDER BY key ASC;")
            .map_err(map_sqlite_error)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .map_err(map_sqlite_error)?;

        let entries = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_sqlite_error)?;
        Ok(entries)
    }
}

fn map_sqlite_error(err: rusqlite::Error) -> StoreError {
    match err.sqlite_error_code() {
        Some(ErrorCode::DiskFull) => StoreError::QuotaExceeded {
            requested_bytes: 0,
            limit_bytes: 0,
        },
        Some(
            ErrorCode::ReadOnly
            | ErrorCode::PermissionDenied
            | ErrorCode::AuthorizationForStatementDenied,
        ) => StoreError::AccessDenied(err.to_string()),
        _ => StoreError::Db(DbError::Sqlite(err)),
    }
}
