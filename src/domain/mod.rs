/// Domain module containing the entity model
///
/// This module defines the entities (Task, Ritual, JournalEntry, Profile,
/// Settings, CustomSound) and the AppState aggregate that holds them, along
/// with their validation rules. Mutation lives in the store.

pub mod journal;
pub mod profile;
pub mod ritual;
pub mod sound;
pub mod state;
pub mod task;
pub mod types;

// Re-export public types for easy access
pub use journal::*;
pub use profile::*;
pub use ritual::*;
pub use sound::*;
pub use state::*;
pub use task::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0} cannot be empty")]
    EmptyText(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },

    #[error("Blank {kind} id")]
    BlankId { kind: String },

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: String, id: String },
}
