//! Domain types for board tasks.
//!
//! All serializable types use `camelCase` for wire compatibility with the
//! board frontend. Timestamps are RFC 3339 UTC strings.

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::ids::TaskId;

/// Minimum title length after trimming surrounding whitespace.
pub const MIN_TITLE_LEN: usize = 5;

/// A task on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique ID (prefixed: `task-{uuid}`), immutable.
    pub id: TaskId,
    /// Short description of the work.
    pub title: String,
    /// Detailed description; empty when none was given.
    #[serde(default)]
    pub description: String,
    /// Column the task currently sits in.
    pub column: Column,
    /// Position within the column (1 = first). Unique per column.
    pub order: u32,
    /// Creation timestamp, never mutated.
    pub created_at: String,
    /// Refreshed on every mutation to title, description, column or order.
    pub updated_at: String,
}

/// Parameters for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateParams {
    /// Short description (required, ≥ [`MIN_TITLE_LEN`] chars trimmed).
    pub title: String,
    /// Detailed description (default: empty).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Column to insert into.
    pub column: Column,
    /// Explicit position. Existing tasks at or after it are shifted down
    /// the column; omitted means append at the end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// Parameters for updating a task's text fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateParams {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parameters for moving a task to a target column/position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskParams {
    /// Target column (may equal the current one).
    pub column: Column,
    /// Target position within the target column.
    pub order: u32,
}

/// One entry of a bulk reorder: a task and its new position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderEntry {
    /// Task to reposition.
    pub id: TaskId,
    /// New position within the column.
    pub order: u32,
}

/// The full board grouped by column, each group in position order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Tasks in the todo column.
    pub todo: Vec<Task>,
    /// Tasks in the in-progress column.
    pub in_progress: Vec<Task>,
    /// Tasks in the completed column.
    pub completed: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: TaskId::generate(),
            title: "Write the release notes".to_string(),
            description: String::new(),
            column: Column::Todo,
            order: 1,
            created_at: "2026-08-01T09:00:00Z".to_string(),
            updated_at: "2026-08-01T09:00:00Z".to_string(),
        }
    }

    #[test]
    fn task_serde_is_camel_case() {
        let json = serde_json::to_string(&sample_task()).unwrap();
        assert!(json.contains("createdAt"));
        assert!(json.contains("updatedAt"));
        assert!(json.contains("\"order\":1"));
        assert!(json.contains("\"column\":\"todo\""));
    }

    #[test]
    fn task_serde_roundtrip() {
        let task = sample_task();
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn create_params_order_is_optional() {
        let params: TaskCreateParams =
            serde_json::from_str(r#"{"title":"Ship the beta","column":"in-progress"}"#).unwrap();
        assert_eq!(params.column, Column::InProgress);
        assert!(params.order.is_none());
        assert!(params.description.is_none());
    }

    #[test]
    fn create_params_rejects_unknown_column() {
        let result = serde_json::from_str::<TaskCreateParams>(
            r#"{"title":"Ship the beta","column":"blocked"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn update_params_default_is_empty_patch() {
        let params = TaskUpdateParams::default();
        assert!(params.title.is_none());
        assert!(params.description.is_none());
    }

    #[test]
    fn reorder_entry_validates_id() {
        let result =
            serde_json::from_str::<ReorderEntry>(r#"{"id":"not-a-task-id","order":2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn board_groups_use_camel_case() {
        let board = Board::default();
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.contains("inProgress"));
        assert!(json.contains("todo"));
        assert!(json.contains("completed"));
    }
}
