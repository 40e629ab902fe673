//! The three fixed board columns.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for an unrecognized column value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown column: {0}")]
pub struct UnknownColumn(pub String);

/// A board column — one of the three fixed task-status buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Column {
    /// Not yet started.
    Todo,
    /// Currently being worked on.
    InProgress,
    /// Done.
    Completed,
}

impl Column {
    /// All columns in board order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Completed];

    /// SQL string representation (matches the `board_column` CHECK values).
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Stable index in [`Self::ALL`]. Used for lock ordering in the store.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

}

impl std::str::FromStr for Column {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(UnknownColumn(s.to_string())),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}
