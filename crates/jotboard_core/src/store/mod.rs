//! Entity stores and their mutation outcome taxonomy.
//!
//! # Responsibility
//! - Hold the authoritative ordered collection for each entity kind.
//! - Mirror every applied mutation to durable storage and report the write
//!   outcome without rolling back in-memory state.
//! - Emit change notifications to registered observers after each applied
//!   mutation.
//!
//! # Invariants
//! - Mutations are atomic against the in-memory collection; validation runs
//!   before any state is touched.
//! - Validation failures and lookup misses change nothing and persist
//!   nothing.
//! - A load failure of any kind yields an empty collection, never a partial
//!   one.

use crate::storage::{KeyValueStorage, StorageError};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

pub mod post_store;
pub mod task_store;

/// Result of mirroring the collection to durable storage.
///
/// A failed write is a warning, not an error: the in-memory collection
/// stays authoritative either way.
#[derive(Debug)]
pub enum PersistStatus {
    Persisted,
    Failed(StorageError),
}

impl PersistStatus {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted)
    }
}

/// Outcome of a single-record mutation.
#[derive(Debug)]
pub enum Mutation<T> {
    /// The mutation was applied; `record` is the affected record after the
    /// change (or the removed record for deletions).
    Applied {
        record: T,
        persist: PersistStatus,
    },
    /// Validation failed; nothing changed and nothing was persisted.
    Rejected,
    /// No record with the given id exists; nothing changed.
    Missing,
}

impl<T> Mutation<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Returns the affected record when the mutation was applied.
    pub fn record(&self) -> Option<&T> {
        match self {
            Self::Applied { record, .. } => Some(record),
            _ => None,
        }
    }
}

/// Outcome of the bulk clear-completed operation.
#[derive(Debug)]
pub enum ClearOutcome {
    Cleared {
        count: usize,
        persist: PersistStatus,
    },
    /// Zero records matched; distinct from success, nothing was persisted.
    NothingToClear,
}

/// Change event emitted after each applied mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Created(Uuid),
    Updated(Uuid),
    Toggled(Uuid),
    Removed(Uuid),
    Cleared(usize),
}

/// Subscriber notified after each applied store mutation.
///
/// Observers must not mutate the store; they exist so rendering and other
/// reactions can subscribe instead of being hard-wired into mutations.
pub trait ChangeObserver {
    fn on_change(&self, change: &StoreChange);
}

/// Reads and deserializes a collection, falling back to empty on any
/// failure per the load contract.
pub(crate) fn load_collection<T, S>(storage: &S, key: &str, module: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: KeyValueStorage,
{
    match storage.read(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "event=store_load module={module} status=fallback_empty key={key} reason=malformed error={err}"
                );
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!(
                "event=store_load module={module} status=fallback_empty key={key} reason=read_failed error={err}"
            );
            Vec::new()
        }
    }
}

/// Serializes the whole collection and writes it under its fixed key.
pub(crate) fn persist_collection<T, S>(
    storage: &mut S,
    key: &str,
    records: &[T],
    module: &str,
) -> PersistStatus
where
    T: Serialize,
    S: KeyValueStorage,
{
    let json = match serde_json::to_string(records) {
        Ok(json) => json,
        Err(err) => {
            warn!("event=store_persist module={module} status=failed key={key} error={err}");
            return PersistStatus::Failed(err.into());
        }
    };

    match storage.write(key, &json) {
        Ok(()) => PersistStatus::Persisted,
        Err(err) => {
            warn!("event=store_persist module={module} status=failed key={key} error={err}");
            PersistStatus::Failed(err)
        }
    }
}
