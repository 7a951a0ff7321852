/// Core types and enums used throughout the domain layer
///
/// This module defines the identifier types and the closed sets (Mood, Theme,
/// Frequency, RitualTime, RitualSymbol, Soundscape) shared by the entities.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a string-backed identifier newtype.
///
/// Identifiers stay plain strings on disk so documents written by earlier
/// versions (timestamp ids such as `"1718000000000"`) keep loading.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Generate a new time-ordered identifier
            pub fn new() -> Self {
                Self(format!("{}{}", $prefix, Uuid::now_v7().simple()))
            }

            /// Borrow the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the identifier is empty or whitespace
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Unique identifier for a task
    TaskId, ""
);
string_id!(
    /// Unique identifier for a ritual
    RitualId, ""
);
string_id!(
    /// Unique identifier for a journal entry
    JournalId, ""
);
string_id!(
    /// Unique identifier for an uploaded sound, always prefixed `custom_`
    SoundId, "custom_"
);

/// Self-reported emotional state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    VerySatisfied,
    Satisfied,
    Neutral,
    Dissatisfied,
    Cloudy,
}

impl Mood {
    /// Every mood in the order the check-in row shows them
    pub const ALL: [Mood; 5] = [
        Mood::VerySatisfied,
        Mood::Satisfied,
        Mood::Neutral,
        Mood::Dissatisfied,
        Mood::Cloudy,
    ];

    /// Wire name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::VerySatisfied => "very_satisfied",
            Mood::Satisfied => "satisfied",
            Mood::Neutral => "neutral",
            Mood::Dissatisfied => "dissatisfied",
            Mood::Cloudy => "cloudy",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Light theme of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Morning,
    Evening,
    Night,
}

/// How often a ritual should be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Frequency {
    /// Every single day
    #[default]
    Daily,
    /// Monday through Friday only
    Weekdays,
    /// Saturday and Sunday only
    Weekends,
}

impl Frequency {
    /// Check if this frequency expects the ritual on a given date
    pub fn is_scheduled_for_date(&self, date: NaiveDate) -> bool {
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        match self {
            Frequency::Daily => true,
            Frequency::Weekdays => !weekend,
            Frequency::Weekends => weekend,
        }
    }
}

/// When a ritual reminder fires
///
/// The three presets come from the ritual planner; anything else is a free
/// label (the seeded "Every 2 hrs" hydration reminder, for instance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RitualTime {
    Sunrise,
    Midday,
    Evening,
    Custom(String),
}

impl RitualTime {
    /// Display label
    pub fn label(&self) -> &str {
        match self {
            RitualTime::Sunrise => "Sunrise",
            RitualTime::Midday => "Midday",
            RitualTime::Evening => "Evening",
            RitualTime::Custom(label) => label,
        }
    }

    /// Clock time of a preset, `None` for custom labels
    pub fn clock(&self) -> Option<&'static str> {
        match self {
            RitualTime::Sunrise => Some("06:30 AM"),
            RitualTime::Midday => Some("12:00 PM"),
            RitualTime::Evening => Some("09:00 PM"),
            RitualTime::Custom(_) => None,
        }
    }
}

impl Default for RitualTime {
    fn default() -> Self {
        RitualTime::Sunrise
    }
}

impl From<String> for RitualTime {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Sunrise" => RitualTime::Sunrise,
            "Midday" => RitualTime::Midday,
            "Evening" => RitualTime::Evening,
            _ => RitualTime::Custom(value),
        }
    }
}

impl From<RitualTime> for String {
    fn from(value: RitualTime) -> Self {
        match value {
            RitualTime::Custom(label) => label,
            preset => preset.label().to_string(),
        }
    }
}

/// Symbol chosen for a ritual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RitualSymbol {
    #[default]
    Nature,
    Rest,
    Focus,
    Energy,
    Brew,
    Read,
    Move,
}

/// Selected ambient soundscape
///
/// Stored as the sentinel `"silence"` or the id of a custom sound.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Soundscape {
    #[default]
    Silence,
    Sound(SoundId),
}

impl Soundscape {
    pub const SILENCE: &'static str = "silence";

    /// True if this soundscape points at the given sound
    pub fn selects(&self, id: &SoundId) -> bool {
        matches!(self, Soundscape::Sound(selected) if selected == id)
    }
}

impl From<String> for Soundscape {
    fn from(value: String) -> Self {
        if value == Self::SILENCE {
            Soundscape::Silence
        } else {
            Soundscape::Sound(SoundId(value))
        }
    }
}

impl From<Soundscape> for String {
    fn from(value: Soundscape) -> Self {
        match value {
            Soundscape::Silence => Soundscape::SILENCE.to_string(),
            Soundscape::Sound(id) => id.0,
        }
    }
}
