/// Profile and Settings records
///
/// Both are replaced wholesale by the store. The only rule carried here is
/// that a profile's join date never moves once the state has been created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::{Soundscape, Theme};

/// Display name given to a fresh profile
pub const DEFAULT_PROFILE_NAME: &str = "Aoi";
/// Avatar given to a fresh profile
pub const DEFAULT_AVATAR: &str =
    "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=400&h=400&fit=crop";

/// The user's profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    /// URL or data URI; opaque to the core
    pub avatar: String,
    pub join_date: DateTime<Utc>,
}

impl Profile {
    /// Profile for a brand new state, joined now
    pub fn new() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            join_date: Utc::now(),
        }
    }

    /// Take name and avatar from `update`, keep this profile's join date
    pub fn replaced_by(&self, update: Profile) -> Self {
        Self {
            join_date: self.join_date,
            ..update
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub soundscape: Soundscape,
}
