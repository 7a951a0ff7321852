/// Storage layer for persisting the AppState document
///
/// The state is kept as one JSON document under one fixed key in a durable
/// key-value store. `StatePersistence` is the load/save adapter the store
/// talks to; `KeyValueStore` is the backend seam (SQLite on disk, or memory).

pub mod memory;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use memory::*;
pub use sqlite::*;

use thiserror::Error;
use crate::domain::{AppState, DomainError};

/// Key the whole state document lives under
pub const STATE_KEY: &str = "softday_state_v2";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stored state is corrupt: {0}")]
    CorruptState(String),

    #[error("Write rejected: {0}")]
    WriteRejected(String),

    #[error("Write blocked: {0}")]
    WriteBlocked(String),

    #[error("Migration error: {0}")]
    Migration(String),
}

impl From<DomainError> for StorageError {
    fn from(err: DomainError) -> Self {
        StorageError::CorruptState(err.to_string())
    }
}

/// Trait defining a durable string key-value store
///
/// No transactions are assumed; each `put` replaces the value for its key
/// as one unit.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; absent keys are not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Load/save adapter between the store and a key-value backend
pub struct StatePersistence<K: KeyValueStore> {
    backend: K,
}

impl<K: KeyValueStore> StatePersistence<K> {
    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    /// Load the persisted state
    ///
    /// Returns `Ok(None)` when nothing has been saved yet and
    /// `Err(StorageError::CorruptState)` when the document cannot be parsed
    /// or fails validation.
    pub fn load(&self) -> Result<Option<AppState>, StorageError> {
        let Some(raw) = self.backend.get(STATE_KEY)? else {
            return Ok(None);
        };

        let state: AppState = serde_json::from_str(&raw)
            .map_err(|e| StorageError::CorruptState(e.to_string()))?;
        state.validate()?;

        tracing::debug!(
            "Loaded state: {} tasks, {} rituals, {} journal entries",
            state.tasks.len(),
            state.rituals.len(),
            state.journals.len()
        );
        Ok(Some(state))
    }

    /// Serialize and write the full state under the state key
    pub fn save(&self, state: &AppState) -> Result<(), StorageError> {
        let document = serde_json::to_string(state)?;
        self.backend.put(STATE_KEY, &document)?;
        tracing::debug!("Saved state ({} bytes)", document.len());
        Ok(())
    }

    /// Forget the persisted state
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(STATE_KEY)
    }

    /// Access the underlying backend (useful for testing)
    pub fn backend(&self) -> &K {
        &self.backend
    }
}
