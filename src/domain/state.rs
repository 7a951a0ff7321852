/// The AppState aggregate
///
/// AppState holds every piece of user data for a session. It is a plain
/// value: the store replaces it wholesale on each change, and the storage
/// layer serializes it as a single JSON document.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CustomSound, DomainError, Frequency, JournalEntry, Mood, Profile, Ritual, RitualId,
    RitualSymbol, RitualTime, Settings, Task, TaskId,
};

/// Placeholder written to `moodAdvice` while an affirmation is on its way
pub const ADVICE_PENDING: &str = "...";

/// Everything the companion knows about its user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub rituals: Vec<Ritual>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_advice: Option<String>,
    /// Most recent first
    #[serde(default)]
    pub journals: Vec<JournalEntry>,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub custom_sounds: Vec<CustomSound>,
    #[serde(default)]
    pub settings: Settings,
}

impl AppState {
    /// The state a first launch starts from
    pub fn seed() -> Self {
        let now = Utc::now();

        Self {
            tasks: vec![
                Task::from_existing(
                    TaskId::from("1"),
                    "Read 10 pages of a book",
                    Some("Maybe with some tea?"),
                    "bg-accent-orange",
                    "book_2",
                    false,
                ),
                Task::from_existing(
                    TaskId::from("2"),
                    "Water the plants",
                    Some("They need love too"),
                    "bg-accent-green",
                    "potted_plant",
                    false,
                ),
            ],
            rituals: vec![
                Ritual {
                    id: RitualId::from("r1"),
                    name: "Hydration".to_string(),
                    frequency: Frequency::Daily,
                    time: RitualTime::Custom("Every 2 hrs".to_string()),
                    symbol: RitualSymbol::Nature,
                    intention: "A mindful sip of water".to_string(),
                    created_at: now,
                    checked: true,
                },
                Ritual {
                    id: RitualId::from("r2"),
                    name: "Deep Breath".to_string(),
                    frequency: Frequency::Daily,
                    time: RitualTime::Sunrise,
                    symbol: RitualSymbol::Rest,
                    intention: "Inhale calm, exhale worry".to_string(),
                    created_at: now,
                    checked: true,
                },
            ],
            mood: None,
            mood_advice: None,
            journals: Vec::new(),
            profile: Profile {
                join_date: now,
                ..Profile::new()
            },
            custom_sounds: Vec::new(),
            settings: Settings::default(),
        }
    }

    /// Check the invariants a loaded document must satisfy
    ///
    /// Closed-set fields are already enforced by deserialization; this covers
    /// identifiers, which must be non-blank and unique within each sequence.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_ids("task", self.tasks.iter().map(|t| t.id.as_str()))?;
        check_ids("ritual", self.rituals.iter().map(|r| r.id.as_str()))?;
        check_ids("journal entry", self.journals.iter().map(|j| j.id.as_str()))?;
        check_ids("sound", self.custom_sounds.iter().map(|s| s.id.as_str()))?;
        Ok(())
    }

    /// True while the placeholder advice is showing
    pub fn advice_pending(&self) -> bool {
        self.mood_advice.as_deref() == Some(ADVICE_PENDING)
    }

    /// Journey statistics shown on the profile screen
    pub fn stats(&self) -> JourneyStats {
        JourneyStats {
            completed_tasks: self.tasks.iter().filter(|t| t.completed).count(),
            active_rituals: self.rituals.iter().filter(|r| r.checked).count(),
            journal_count: self.journals.len(),
            member_since: self.profile.join_date,
        }
    }

    /// Active rituals whose frequency covers `date`
    pub fn rituals_due_on(&self, date: NaiveDate) -> Vec<&Ritual> {
        self.rituals.iter().filter(|r| r.is_due_on(date)).collect()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::seed()
    }
}

fn check_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(DomainError::BlankId { kind: kind.to_string() });
        }
        if !seen.insert(id) {
            return Err(DomainError::DuplicateId {
                kind: kind.to_string(),
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Aggregate counts for the profile screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStats {
    pub completed_tasks: usize,
    pub active_rituals: usize,
    pub journal_count: usize,
    pub member_since: DateTime<Utc>,
}
