//! In-memory key-value storage.
//!
//! # Responsibility
//! - Provide a zero-setup backend for tests and demo wiring.
//!
//! # Invariants
//! - Clones share the same underlying map, mirroring how one page session
//!   shares one durable store across managers.

use super::{KeyValueStorage, StorageResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared-map storage backend. `Clone` hands out another handle to the
/// same map, so tests can observe what a store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
