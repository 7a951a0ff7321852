/// Task entity
///
/// A task is a small thing the user intends to do today. Tasks are only ever
/// created and toggled; there is no delete path.

use serde::{Deserialize, Serialize};
use crate::domain::{DomainError, TaskId};

/// Subtext attached to every task the user adds
pub const USER_TASK_SUBTEXT: &str = "Added today";
/// Color identifier attached to every task the user adds
pub const USER_TASK_COLOR: &str = "bg-matcha";
/// Icon identifier attached to every task the user adds
pub const USER_TASK_ICON: &str = "spa";

/// A single to-do item on the home screen
///
/// `color` and `icon` are opaque identifiers resolved by the presentation
/// layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    pub color: String,
    pub icon: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a user-added task with the fixed defaults
    pub fn new(text: String) -> Result<Self, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::EmptyText("task text".to_string()));
        }

        Ok(Self {
            id: TaskId::new(),
            text,
            subtext: Some(USER_TASK_SUBTEXT.to_string()),
            color: USER_TASK_COLOR.to_string(),
            icon: USER_TASK_ICON.to_string(),
            completed: false,
        })
    }

    /// Create a task with explicit presentation fields (used for the seed)
    pub fn from_existing(
        id: TaskId,
        text: &str,
        subtext: Option<&str>,
        color: &str,
        icon: &str,
        completed: bool,
    ) -> Self {
        Self {
            id,
            text: text.to_string(),
            subtext: subtext.map(str::to_string),
            color: color.to_string(),
            icon: icon.to_string(),
            completed,
        }
    }

    /// Copy of this task with `completed` flipped
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}
