/// Ritual entity and the draft used to plant one
///
/// A ritual is a recurring self-care habit. It is created active
/// (`checked = true`) and afterwards only toggled.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::{Frequency, RitualId, RitualSymbol, RitualTime};

/// Name used when the planner is submitted without one
pub const UNTITLED_RITUAL: &str = "Untitled Ritual";
/// Intention used when the planner is submitted without one
pub const DEFAULT_INTENTION: &str = "A mindful moment";
/// Longest intention the planner accepts, in characters
pub const MAX_INTENTION_CHARS: usize = 200;

/// A recurring self-care habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ritual {
    pub id: RitualId,
    pub name: String,
    pub frequency: Frequency,
    pub time: RitualTime,
    pub symbol: RitualSymbol,
    pub intention: String,
    pub created_at: DateTime<Utc>,
    pub checked: bool,
}

impl Ritual {
    /// Plant a ritual from a draft: fresh id, `checked`, created now
    pub fn new(draft: RitualDraft) -> Self {
        let draft = draft.normalized();
        Self {
            id: RitualId::new(),
            name: draft.name,
            frequency: draft.frequency,
            time: draft.time,
            symbol: draft.symbol,
            intention: draft.intention,
            created_at: Utc::now(),
            checked: true,
        }
    }

    /// Copy of this ritual with `checked` flipped
    pub fn toggled(&self) -> Self {
        Self {
            checked: !self.checked,
            ..self.clone()
        }
    }

    /// Whether the ritual is active and its frequency covers `date`
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.checked && self.frequency.is_scheduled_for_date(date)
    }
}

/// User-supplied ritual fields, before id, status and timestamp are assigned
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RitualDraft {
    pub name: String,
    pub frequency: Frequency,
    pub time: RitualTime,
    pub symbol: RitualSymbol,
    pub intention: String,
}

impl RitualDraft {
    /// Trim fields, fill blanks with the planner defaults and cap the intention
    ///
    /// A custom time spelling a preset label becomes that preset.
    pub fn normalized(self) -> Self {
        let name = match self.name.trim() {
            "" => UNTITLED_RITUAL.to_string(),
            trimmed => trimmed.to_string(),
        };
        let intention = match self.intention.trim() {
            "" => DEFAULT_INTENTION.to_string(),
            trimmed => trimmed.chars().take(MAX_INTENTION_CHARS).collect(),
        };

        Self {
            name,
            intention,
            time: RitualTime::from(String::from(self.time)),
            ..self
        }
    }
}
