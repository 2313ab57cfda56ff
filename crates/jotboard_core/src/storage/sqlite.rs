//! SQLite-backed key-value storage.
//!
//! # Responsibility
//! - Open and bootstrap SQLite connections holding the `kv_entries` table.
//! - Implement the [`KeyValueStorage`] contract on top of it.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Databases written by a newer schema version are rejected, not patched.
//! - Returned storages are fully bootstrapped before first use.

use super::{KeyValueStorage, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection};
use std::path::Path;
use std::time::{Duration, Instant};

const KV_SCHEMA_VERSION: u32 = 1;

/// Key-value storage persisted in a single SQLite table.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens a database file and bootstraps the key-value schema.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let started_at = Instant::now();
        let conn = match Connection::open(path) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=kv_open module=storage status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };
        Self::from_connection(conn, "file", started_at)
    }

    /// Opens an in-memory database, mainly for tests and demos.
    pub fn open_in_memory() -> StorageResult<Self> {
        let started_at = Instant::now();
        let conn = match Connection::open_in_memory() {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=kv_open module=storage status=error mode=memory duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };
        Self::from_connection(conn, "memory", started_at)
    }

    fn from_connection(conn: Connection, mode: &str, started_at: Instant) -> StorageResult<Self> {
        match bootstrap(&conn) {
            Ok(()) => {
                info!(
                    "event=kv_open module=storage status=ok mode={mode} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=kv_open module=storage status=error mode={mode} duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

impl KeyValueStorage for SqliteStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv_entries WHERE key = ?1;")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn bootstrap(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;

    let db_version: i64 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if db_version > i64::from(KV_SCHEMA_VERSION) {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: db_version.try_into().unwrap_or(u32::MAX),
            latest_supported: KV_SCHEMA_VERSION,
        });
    }

    if db_version < i64::from(KV_SCHEMA_VERSION) {
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS kv_entries (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );
            PRAGMA user_version = {KV_SCHEMA_VERSION};"
        ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStorage, SqliteStorage, StorageError};
    use rusqlite::Connection;

    #[test]
    fn read_returns_none_for_absent_key() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert_eq!(storage.read("todos").unwrap(), None);
    }

    #[test]
    fn write_then_read_roundtrips_and_replaces() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        storage.write("todos", "[\"a\"]").unwrap();
        storage.write("todos", "[\"b\"]").unwrap();
        assert_eq!(storage.read("todos").unwrap().as_deref(), Some("[\"b\"]"));
    }

    #[test]
    fn newer_schema_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("PRAGMA user_version = 99;").unwrap();
        }

        match SqliteStorage::open(&path) {
            Err(StorageError::UnsupportedSchemaVersion { db_version, .. }) => {
                assert_eq!(db_version, 99)
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected schema version rejection"),
        }
    }
}
