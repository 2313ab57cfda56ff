//! Durable key-value storage contracts and implementations.
//!
//! # Responsibility
//! - Define the string key-value contract the entity stores persist through.
//! - Keep backend details (SQLite, in-memory map) behind one trait.
//!
//! # Invariants
//! - Storage holds whole serialized collections; it never sees individual
//!   records.
//! - Storage failures are reported to callers, never panicked on.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Error for key-value read/write and backend bootstrap operations.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    Encoding(serde_json::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Encoding(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Backend(message) => write!(f, "{message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Encoding(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::Backend(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encoding(value)
    }
}

/// Durable string key-value store, one fixed key per entity kind.
pub trait KeyValueStorage {
    /// Reads the value stored under `key`, `None` when absent.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
}
