//! Error types for the task store and ordering engine.
//!
//! [`BoardError`] is the single error type returned by all store operations.
//! Each variant maps to one stable failure kind, so the request layer can
//! pick a response status without inspecting store internals.

use thiserror::Error;

/// Errors from board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Input failed validation (short title, non-positive order, bad value).
    #[error("validation error: {0}")]
    Validation(String),

    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity type (currently always "Task").
        entity: &'static str,
        /// The ID that was looked up.
        id: String,
    },

    /// A write was rejected by the (column, order) uniqueness constraint.
    /// Surfaced to the caller, never silently retried.
    #[error("conflict: {0}")]
    Conflict(String),

    /// `SQLite` database error.
    #[error("sqlite error: {0}")]
    Sqlite(rusqlite::Error),

    /// Connection pool error.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Internal error (e.g. poisoned lock).
    #[error("internal error: {0}")]
    Internal(String),
}

impl BoardError {
    /// Create a not-found error for a task.
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Task",
            id: id.into(),
        }
    }
}

/// Unique-constraint rejections become [`BoardError::Conflict`]; everything
/// else stays a database error.
impl From<rusqlite::Error> for BoardError {
    fn from(e: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(ref ffi_err, ref message) = e {
            if ffi_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || ffi_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
            {
                return Self::Conflict(
                    message
                        .clone()
                        .unwrap_or_else(|| "unique constraint violated".to_string()),
                );
            }
        }
        Self::Sqlite(e)
    }
}

/// Convenience type alias for store results.
pub type Result<T> = std::result::Result<T, BoardError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
