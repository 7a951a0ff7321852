/// The state store
///
/// `Store` is the single owner of the current AppState. Every change goes
/// through one of its operations (one file per area: tasks, rituals,
/// journal, mood, preferences). Each operation builds the next snapshot from
/// the current one, persists it, and publishes it to subscribers.

pub mod journal;
pub mod mood;
pub mod preferences;
pub mod rituals;
pub mod tasks;

pub use mood::AdviceTicket;

use tokio::sync::watch;

use crate::domain::{AppState, JourneyStats};
use crate::storage::{KeyValueStore, StatePersistence, StorageError};

/// Result of a store operation
///
/// The in-memory change always applies. `warning` carries the persistence
/// error when the durable write failed; the next successful write will
/// catch the store up.
#[derive(Debug)]
#[must_use]
pub struct Applied<T> {
    pub value: T,
    pub warning: Option<StorageError>,
}

impl<T> Applied<T> {
    fn clean(value: T) -> Self {
        Self { value, warning: None }
    }

    /// True when the change reached durable storage (or nothing needed writing)
    pub fn is_durable(&self) -> bool {
        self.warning.is_none()
    }

    /// Discard the warning and keep the value
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Single owner of the AppState
pub struct Store<K: KeyValueStore> {
    persistence: StatePersistence<K>,
    state: AppState,
    notifier: watch::Sender<AppState>,
    /// Incremented for every advice request; only the latest may resolve
    advice_generation: u64,
    /// Set while the stored document could not be read; writes would clobber it
    persist_blocked: bool,
}

impl<K: KeyValueStore> Store<K> {
    /// Open the store from persisted data, falling back to the seed
    ///
    /// A missing or corrupt document yields the default seed, which is
    /// written back immediately. Any other read failure also starts from the
    /// seed but blocks writes: each later operation first retries the read,
    /// adopts the stored state once it is readable, and only then persists.
    pub fn open(persistence: StatePersistence<K>) -> Self {
        let (state, write_seed, persist_blocked) = match persistence.load() {
            Ok(Some(state)) => {
                tracing::info!("Restored saved state");
                (state, false, false)
            }
            Ok(None) => {
                tracing::info!("No saved state found, starting from seed");
                (AppState::seed(), true, false)
            }
            Err(StorageError::CorruptState(reason)) => {
                tracing::warn!("Saved state is corrupt ({}), starting from seed", reason);
                (AppState::seed(), true, false)
            }
            Err(e) => {
                tracing::warn!("Could not read saved state ({}), starting from seed", e);
                (AppState::seed(), false, true)
            }
        };

        if write_seed {
            if let Err(e) = persistence.save(&state) {
                tracing::warn!("Failed to persist seed state: {}", e);
            }
        }

        let (notifier, _) = watch::channel(state.clone());

        Self {
            persistence,
            state,
            notifier,
            advice_generation: 0,
            persist_blocked,
        }
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Receive every new snapshot as it is committed
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.notifier.subscribe()
    }

    /// Journey statistics derived from the current state
    pub fn stats(&self) -> JourneyStats {
        self.state.stats()
    }

    /// Get a reference to the persistence adapter (useful for testing)
    pub fn persistence(&self) -> &StatePersistence<K> {
        &self.persistence
    }

    /// True while writes wait for the stored document to become readable
    pub fn is_persist_blocked(&self) -> bool {
        self.persist_blocked
    }

    /// Retry the read that failed at open
    ///
    /// Called at the start of every operation. A readable document replaces
    /// the in-memory state so the operation builds on it; a missing or
    /// corrupt one unblocks writes and keeps the current state.
    fn recover_stored_state(&mut self) {
        if !self.persist_blocked {
            return;
        }

        match self.persistence.load() {
            Ok(Some(state)) => {
                tracing::info!("Saved state readable again, adopting it");
                self.persist_blocked = false;
                self.state = state;
                self.notifier.send_replace(self.state.clone());
            }
            Ok(None) | Err(StorageError::CorruptState(_)) => {
                tracing::info!("No usable saved state, persisting from memory");
                self.persist_blocked = false;
            }
            Err(e) => {
                tracing::debug!("Saved state still unreadable: {}", e);
            }
        }
    }

    /// Replace the current state, persist it and notify subscribers
    fn commit<T>(&mut self, next: AppState, value: T) -> Applied<T> {
        self.state = next;

        let warning = if self.persist_blocked {
            tracing::warn!("State change kept in memory; saved state is unreadable");
            Some(StorageError::WriteBlocked(
                "saved state could not be read, leaving it untouched".to_string(),
            ))
        } else {
            match self.persistence.save(&self.state) {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!("State change kept in memory but not persisted: {}", e);
                    Some(e)
                }
            }
        };

        self.notifier.send_replace(self.state.clone());

        Applied { value, warning }
    }
}
