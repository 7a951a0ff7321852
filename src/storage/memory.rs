/// In-memory key-value backend
///
/// Used for ephemeral sessions (`--memory`) and tests. Reads and writes can
/// be made to fail on demand to exercise the persistence-failure paths.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::storage::{KeyValueStore, StorageError};

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<HashMap<String, String>>,
    reject_writes: Cell<bool>,
    reject_reads: Cell<bool>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put` fail until switched back
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    /// Make every subsequent `get` fail until switched back
    pub fn set_reject_reads(&self, reject: bool) {
        self.reject_reads.set(reject);
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.reject_reads.get() {
            return Err(StorageError::Connection("memory store is unreadable".to_string()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.reject_writes.get() {
            return Err(StorageError::WriteRejected("memory store is read-only".to_string()));
        }
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
