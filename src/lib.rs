/// Public library interface for the SoftDay companion
///
/// This module exports the state core (domain model, persistence, store),
/// the navigation controller, the advice collaborator and the `Companion`
/// controller that ties them together for one session.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, watch};

pub mod advice;
pub mod config;
pub mod domain;
pub mod navigation;
pub mod playback;
pub mod session;
pub mod storage;
pub mod store;

// Re-export public modules and types
pub use advice::{AdviceCollaborator, AdviceProvider, AdviceRequest};
pub use config::{AdviceConfig, CompanionConfig, StorageTarget};
pub use domain::*;
pub use navigation::{NavIntent, NavTab, Navigator, Screen};
pub use playback::{resolve_soundscape, PlaybackSource};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StatePersistence, StorageError,
};
pub use store::{AdviceTicket, Applied, Store};

/// Errors that can occur while running a companion
#[derive(Error, Debug)]
pub enum CompanionError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fetched advice on its way back to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdviceResolution {
    pub ticket: AdviceTicket,
    pub advice: String,
}

/// Storage backend chosen at runtime
pub type DynKeyValueStore = Box<dyn KeyValueStore>;

/// One companion session
///
/// Owns the store and the navigator. Advice fetches run as spawned tasks
/// and report back through a channel; `next_advice` receives them and
/// `apply_advice` hands them to the store, which drops stale ones.
pub struct Companion<K: KeyValueStore> {
    store: Store<K>,
    navigator: Navigator,
    advice: AdviceCollaborator,
    resolutions_tx: mpsc::UnboundedSender<AdviceResolution>,
    resolutions_rx: mpsc::UnboundedReceiver<AdviceResolution>,
}

impl Companion<DynKeyValueStore> {
    /// Open a companion from resolved configuration
    ///
    /// Uses the SQLite file or in-memory backend named by the config, and
    /// the remote advice provider when an API key is present.
    pub fn open(config: &CompanionConfig) -> Result<Self, CompanionError> {
        let backend: DynKeyValueStore = match &config.storage {
            StorageTarget::File(path) => {
                tracing::info!("Opening state database at {}", path.display());
                Box::new(SqliteKeyValueStore::new(path.clone())?)
            }
            StorageTarget::Memory => {
                tracing::info!("Using in-memory state; nothing will survive this session");
                Box::new(MemoryKeyValueStore::new())
            }
        };

        let store = Store::open(StatePersistence::new(backend));
        Ok(Self::new(store, advice::collaborator_for(&config.advice)))
    }
}

impl<K: KeyValueStore> Companion<K> {
    pub fn new(store: Store<K>, advice: AdviceCollaborator) -> Self {
        let (resolutions_tx, resolutions_rx) = mpsc::unbounded_channel();
        Self {
            store,
            navigator: Navigator::new(),
            advice,
            resolutions_tx,
            resolutions_rx,
        }
    }

    /// Companion over any backend with the given advice provider
    pub fn with_provider(backend: K, provider: Arc<dyn AdviceProvider>, timeout: Duration) -> Self {
        let store = Store::open(StatePersistence::new(backend));
        Self::new(store, AdviceCollaborator::new(provider, timeout))
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn stats(&self) -> JourneyStats {
        self.store.stats()
    }

    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.store.subscribe()
    }

    /// Get a reference to the store (useful for testing)
    pub fn store(&self) -> &Store<K> {
        &self.store
    }

    pub fn advice(&self) -> &AdviceCollaborator {
        &self.advice
    }

    pub fn navigate(&mut self, intent: NavIntent) -> Screen {
        self.navigator.apply(intent)
    }

    /// Add a task; closes the add-thought sheet when it was open
    pub fn add_task(&mut self, text: String) -> Result<Applied<Task>, DomainError> {
        let applied = self.store.add_task(text)?;
        if self.navigator.current() == Screen::AddThought {
            self.navigator.apply(NavIntent::ThoughtAdded);
        }
        Ok(applied)
    }

    pub fn toggle_task(&mut self, id: &TaskId) -> Applied<bool> {
        self.store.toggle_task(id)
    }

    /// Plant a ritual; leaves the creation screen when it was open
    pub fn add_ritual(&mut self, draft: RitualDraft) -> Applied<Ritual> {
        let applied = self.store.add_ritual(draft);
        if self.navigator.current() == Screen::CreateRitual {
            self.navigator.apply(NavIntent::RitualPlanted);
        }
        applied
    }

    pub fn toggle_ritual(&mut self, id: &RitualId) -> Applied<bool> {
        self.store.toggle_ritual(id)
    }

    /// Save a journal entry and move to the journals list
    pub fn save_journal(&mut self, content: String) -> Result<Applied<JournalEntry>, DomainError> {
        let applied = self.store.save_journal(content)?;
        self.navigator.apply(NavIntent::JournalSaved);
        Ok(applied)
    }

    /// Record a mood and start fetching advice for it
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_mood(&mut self, mood: Mood) -> Applied<AdviceTicket> {
        let applied = self.store.begin_mood(mood);
        self.request_advice(applied.value);
        applied
    }

    pub fn update_settings(&mut self, settings: Settings) -> Applied<Settings> {
        self.store.update_settings(settings)
    }

    pub fn update_profile(&mut self, profile: Profile) -> Applied<Profile> {
        self.store.update_profile(profile)
    }

    pub fn add_custom_sound(
        &mut self,
        sound: CustomSound,
    ) -> Result<Applied<CustomSound>, DomainError> {
        self.store.add_custom_sound(sound)
    }

    pub fn remove_custom_sound(&mut self, id: &SoundId) -> Applied<bool> {
        self.store.remove_custom_sound(id)
    }

    /// What the audio layer should play right now
    pub fn soundscape(&self) -> PlaybackSource {
        resolve_soundscape(self.store.state())
    }

    /// Re-request advice left pending by an earlier session
    pub fn resume_pending_advice(&mut self) -> Option<AdviceTicket> {
        let ticket = self.store.resume_pending_advice()?;
        tracing::info!("Resuming pending advice for {}", ticket.mood);
        self.request_advice(ticket);
        Some(ticket)
    }

    /// Wait for the next finished advice fetch
    pub async fn next_advice(&mut self) -> Option<AdviceResolution> {
        self.resolutions_rx.recv().await
    }

    /// Apply a finished fetch; stale resolutions are dropped
    pub fn apply_advice(&mut self, resolution: AdviceResolution) -> Applied<bool> {
        self.store.resolve_advice(resolution.ticket, resolution.advice)
    }

    fn request_advice(&self, ticket: AdviceTicket) {
        let advice = self.advice.clone();
        let resolutions = self.resolutions_tx.clone();

        tracing::debug!(
            "Requesting advice from {} (request #{})",
            advice.provider_name(),
            ticket.generation
        );

        tokio::spawn(async move {
            let text = advice.get_advice(AdviceRequest::for_mood(ticket.mood)).await;
            if resolutions.send(AdviceResolution { ticket, advice: text }).is_err() {
                tracing::debug!("Companion closed before advice #{} arrived", ticket.generation);
            }
        });
    }
}
