//! Task record for the todo manager.
//!
//! # Responsibility
//! - Define the task shape persisted under the `todos` key.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `created_at` is immutable across updates.
//! - Serialized field names follow the persisted layout (`dueDate`,
//!   `createdAt`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task record.
pub type TaskId = Uuid;

/// Task urgency level shown as a badge in list views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Serialized/display name for this priority.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parses a priority name, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Canonical todo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub created_at: i64,
}

impl Task {
    /// Creates a task with a generated stable id and `completed = false`.
    pub fn new(
        text: impl Into<String>,
        priority: Priority,
        due_date: Option<NaiveDate>,
        created_at: i64,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), text, priority, due_date, created_at)
    }

    /// Creates a task with a caller-provided stable id.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(
        id: TaskId,
        text: impl Into<String>,
        priority: Priority,
        due_date: Option<NaiveDate>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            priority,
            due_date,
            created_at,
        }
    }
}
