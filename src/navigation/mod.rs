/// Navigation controller
///
/// The current screen is a finite-state value. `transition` is the pure
/// table mapping (screen, intent) to the next screen; `Navigator` holds the
/// current value for a session.

pub mod reflection;

pub use reflection::{BreathCycle, BreathPhase, BREATH_PHASE_DURATION};

use serde::{Deserialize, Serialize};

/// Every screen of the companion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    Welcome,
    Home,
    AddThought,
    JournalWrite,
    JournalsList,
    Nudges,
    Reflection,
    Settings,
    CreateRitual,
    Profile,
    PrivacyManifesto,
}

impl Screen {
    /// Whether the bottom navigation bar is shown on this screen
    pub fn shows_bottom_nav(&self) -> bool {
        matches!(
            self,
            Screen::Home
                | Screen::JournalsList
                | Screen::Nudges
                | Screen::Settings
                | Screen::Profile
        )
    }

    /// Bottom navigation tab highlighted while on this screen
    pub fn active_tab(&self) -> Option<NavTab> {
        match self {
            Screen::Home => Some(NavTab::Home),
            Screen::JournalsList | Screen::JournalWrite => Some(NavTab::Journals),
            Screen::Nudges => Some(NavTab::Rituals),
            Screen::Settings | Screen::Profile => Some(NavTab::Settings),
            _ => None,
        }
    }

    /// Where the back/close control of this screen leads
    fn back_target(&self) -> Screen {
        match self {
            Screen::Welcome => Screen::Welcome,
            Screen::Home
            | Screen::AddThought
            | Screen::JournalWrite
            | Screen::JournalsList
            | Screen::Nudges
            | Screen::Reflection
            | Screen::Profile => Screen::Home,
            Screen::CreateRitual => Screen::Nudges,
            Screen::Settings => Screen::Profile,
            Screen::PrivacyManifesto => Screen::Settings,
        }
    }
}

/// Tabs of the bottom navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavTab {
    Home,
    Journals,
    Rituals,
    Settings,
}

impl NavTab {
    /// Screen a tab opens
    pub fn screen(&self) -> Screen {
        match self {
            NavTab::Home => Screen::Home,
            NavTab::Journals => Screen::JournalsList,
            NavTab::Rituals => Screen::Nudges,
            NavTab::Settings => Screen::Settings,
        }
    }
}

/// User intents that move between screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "screen", rename_all = "snake_case")]
pub enum NavIntent {
    /// "Begin" on the welcome screen
    Start,
    /// Explicit target (buttons, cards, bottom navigation)
    Open(Screen),
    /// Back/close control of the current screen
    Back,
    /// Leave the session from the profile screen
    Logout,
    /// A journal entry was saved
    JournalSaved,
    /// A new ritual was planted
    RitualPlanted,
    /// A task was added from the add-thought sheet
    ThoughtAdded,
}

/// Compute the next screen
pub fn transition(current: Screen, intent: NavIntent) -> Screen {
    match intent {
        NavIntent::Start => match current {
            Screen::Welcome => Screen::Home,
            other => other,
        },
        NavIntent::Open(target) => target,
        NavIntent::Back => current.back_target(),
        NavIntent::Logout => Screen::Welcome,
        NavIntent::JournalSaved => Screen::JournalsList,
        NavIntent::RitualPlanted => Screen::Nudges,
        NavIntent::ThoughtAdded => Screen::Home,
    }
}

/// Holds the current screen for a session
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Screen,
}

impl Navigator {
    /// Sessions always open on the welcome screen
    pub fn new() -> Self {
        Self {
            current: Screen::Welcome,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Apply an intent and return the new screen
    pub fn apply(&mut self, intent: NavIntent) -> Screen {
        let next = transition(self.current, intent);
        if next != self.current {
            tracing::debug!("Navigate {:?} -> {:?} ({:?})", self.current, next, intent);
        }
        self.current = next;
        next
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
