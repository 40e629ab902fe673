//! Branded task identifier.
//!
//! IDs are opaque strings of the form `task-{uuid-v7}`. The newtype keeps
//! malformed identifiers out of the store: deserialization and
//! [`TaskId::parse`] both validate the prefix and the UUID payload, so a
//! handler can reject a bad path parameter before any lookup runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error for a malformed task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid task id: {0}")]
pub struct InvalidTaskId(pub String);

/// Unique task identifier, formatted `task-{uuid-v7}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("task-{}", Uuid::now_v7()))
    }

    /// Parse and validate an identifier string.
    pub fn parse(s: &str) -> Result<Self, InvalidTaskId> {
        let raw = s
            .strip_prefix("task-")
            .ok_or_else(|| InvalidTaskId(s.to_string()))?;
        let _ = Uuid::parse_str(raw).map_err(|_| InvalidTaskId(s.to_string()))?;
        Ok(Self(s.to_string()))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskId {
    type Error = InvalidTaskId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}
