use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

/// Session-scoped handle for a task. Never written to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty task text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskText(String);

impl TaskText {
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StoreError::BlankText);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Persisted record, serialized as `{"text":..,"completed":..}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub text: String,
    pub completed: bool,
}

impl Task {
    pub fn new(text: TaskText) -> Self {
        Self {
            text: text.into_inner(),
            completed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_text_trims_and_rejects_blank() {
        let text = TaskText::parse("  Buy milk \n").expect("valid text");
        assert_eq!(text.as_str(), "Buy milk");

        assert!(matches!(TaskText::parse("   "), Err(StoreError::BlankText)));
        assert!(matches!(TaskText::parse(""), Err(StoreError::BlankText)));
    }

    #[test]
    fn task_serializes_in_browser_layout() {
        let task = Task::new(TaskText::parse("Buy milk").expect("valid text"));
        let json = serde_json::to_string(&task).expect("serialize");
        assert_eq!(json, r#"{"text":"Buy milk","completed":false}"#);
    }

    #[test]
    fn task_ids_are_distinct() {
        assert_ne!(TaskId::new(), TaskId::new());
    }
}
