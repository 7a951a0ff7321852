/// JournalEntry entity
///
/// Entries are immutable once written. The mood is a snapshot of whatever
/// the user had checked in with when the entry was saved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::{DomainError, JournalId, Mood};

/// One written reflection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: JournalId,
    pub date: DateTime<Utc>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

impl JournalEntry {
    /// Create an entry dated now
    pub fn new(content: String, mood: Option<Mood>) -> Result<Self, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::EmptyText("journal content".to_string()));
        }

        Ok(Self {
            id: JournalId::new(),
            date: Utc::now(),
            content,
            mood,
        })
    }
}
