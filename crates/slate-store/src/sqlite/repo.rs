//! Task repository — stateless row operations, every method takes `&Connection`.
//!
//! This layer knows SQL and nothing else: it provides the point lookups,
//! range scans and shift primitives the ordering engine composes into
//! transactions. Positions live in `sort_order`; the unique
//! `(board_column, sort_order)` index is the storage-level backstop for
//! per-column uniqueness.
//!
//! Shifts use a two-pass sign flip: SQLite enforces UNIQUE per row within a
//! single multi-row UPDATE, so the first pass parks the affected range at
//! negative values and the second flips it back. Negative intermediates are
//! injective, so the flip can never collide with itself.

use rusqlite::{Connection, OptionalExtension, params};

use slate_core::{Column, Task, TaskId, TaskUpdateParams};

use crate::errors::Result;

const TASK_COLS: &str = "id, title, description, board_column, sort_order, created_at, updated_at";

/// Map a row with [`TASK_COLS`] into a [`Task`].
fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    let id: String = row.get(0)?;
    let id = TaskId::parse(&id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let column: String = row.get(3)?;
    let column = column.parse::<Column>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let sort_order: i64 = row.get(4)?;
    let order = u32::try_from(sort_order).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Integer, Box::new(e))
    })?;
    Ok(Task {
        id,
        title: row.get(1)?,
        description: row.get(2)?,
        column,
        order,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// Task repository — stateless, every method takes `&Connection`.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task row.
    pub fn insert(conn: &Connection, task: &Task) -> Result<()> {
        let _ = conn.execute(
            "INSERT INTO tasks (id, title, description, board_column, sort_order, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                task.id.as_str(),
                task.title,
                task.description,
                task.column.as_sql(),
                task.order,
                task.created_at,
                task.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a task by ID.
    pub fn get(conn: &Connection, id: &TaskId) -> Result<Option<Task>> {
        let task = conn
            .query_row(
                &format!("SELECT {TASK_COLS} FROM tasks WHERE id = ?1"),
                params![id.as_str()],
                task_from_row,
            )
            .optional()?;
        Ok(task)
    }

    /// List every task, ordered by column then position.
    pub fn list(conn: &Connection) -> Result<Vec<Task>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLS} FROM tasks
             ORDER BY CASE board_column
               WHEN 'todo' THEN 0 WHEN 'in-progress' THEN 1 ELSE 2 END,
             sort_order"
        ))?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// List a column's tasks in position order.
    pub fn list_column(conn: &Connection, column: Column) -> Result<Vec<Task>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLS} FROM tasks WHERE board_column = ?1 ORDER BY sort_order"
        ))?;
        let tasks = stmt
            .query_map(params![column.as_sql()], task_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Highest position in a column, or 0 when the column is empty.
    pub fn max_order(conn: &Connection, column: Column) -> Result<u32> {
        let max: i64 = conn.query_row(
            "SELECT COALESCE(MAX(sort_order), 0) FROM tasks WHERE board_column = ?1",
            params![column.as_sql()],
            |row| row.get(0),
        )?;
        Ok(u32::try_from(max).unwrap_or(0))
    }

    /// Number of tasks in a column.
    pub fn count_column(conn: &Connection, column: Column) -> Result<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM tasks WHERE board_column = ?1",
            params![column.as_sql()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Open a slot at `at`: every task with position in `[at, before)` moves
    /// up one (`before = None` means unbounded). Returns the number of tasks
    /// shifted.
    pub fn shift_up(
        conn: &Connection,
        column: Column,
        at: u32,
        before: Option<u32>,
        now: &str,
    ) -> Result<usize> {
        let moved = match before {
            Some(before) => conn.execute(
                "UPDATE tasks SET sort_order = -(sort_order + 1), updated_at = ?1
                 WHERE board_column = ?2 AND sort_order >= ?3 AND sort_order < ?4",
                params![now, column.as_sql(), at, before],
            )?,
            None => conn.execute(
                "UPDATE tasks SET sort_order = -(sort_order + 1), updated_at = ?1
                 WHERE board_column = ?2 AND sort_order >= ?3",
                params![now, column.as_sql(), at],
            )?,
        };
        Self::flip_parked(conn, column)?;
        Ok(moved)
    }

    /// Close a slot: every task with position in `(after, upto]` moves down
    /// one (`upto = None` means unbounded). The slot at `after` (or just
    /// above it) must already be vacant. Returns the number of tasks shifted.
    pub fn shift_down(
        conn: &Connection,
        column: Column,
        after: u32,
        upto: Option<u32>,
        now: &str,
    ) -> Result<usize> {
        let moved = match upto {
            Some(upto) => conn.execute(
                "UPDATE tasks SET sort_order = -(sort_order - 1), updated_at = ?1
                 WHERE board_column = ?2 AND sort_order > ?3 AND sort_order <= ?4",
                params![now, column.as_sql(), after, upto],
            )?,
            None => conn.execute(
                "UPDATE tasks SET sort_order = -(sort_order - 1), updated_at = ?1
                 WHERE board_column = ?2 AND sort_order > ?3",
                params![now, column.as_sql(), after],
            )?,
        };
        Self::flip_parked(conn, column)?;
        Ok(moved)
    }

    /// Park a task at position 0 so in-flight shifts cannot collide with it.
    /// 0 is never a live position; the caller places the task afterwards.
    pub fn park(conn: &Connection, id: &TaskId) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE tasks SET sort_order = 0 WHERE id = ?1",
            params![id.as_str()],
        )?;
        Ok(changed > 0)
    }

    /// Set a task's column and position.
    pub fn set_placement(
        conn: &Connection,
        id: &TaskId,
        column: Column,
        order: u32,
        now: &str,
    ) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE tasks SET board_column = ?2, sort_order = ?3, updated_at = ?4 WHERE id = ?1",
            params![id.as_str(), column.as_sql(), order, now],
        )?;
        Ok(changed > 0)
    }

    /// Stage one bulk-reorder entry at its negative target position.
    ///
    /// Entries are applied unconditionally within the column; duplicate
    /// targets among entries trip the unique index here. Returns `false`
    /// when the task is not in the given column.
    pub fn stage_order(
        conn: &Connection,
        id: &TaskId,
        column: Column,
        order: u32,
        now: &str,
    ) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE tasks SET sort_order = -(?3), updated_at = ?4
             WHERE id = ?1 AND board_column = ?2",
            params![id.as_str(), column.as_sql(), order, now],
        )?;
        Ok(changed > 0)
    }

    /// Flip every parked (negative) position in a column back to positive.
    /// A collision with an unshifted task surfaces as a unique-index error.
    pub fn flip_parked(conn: &Connection, column: Column) -> Result<usize> {
        let flipped = conn.execute(
            "UPDATE tasks SET sort_order = -sort_order
             WHERE board_column = ?1 AND sort_order < 0",
            params![column.as_sql()],
        )?;
        Ok(flipped)
    }

    /// Patch title and/or description, refreshing `updated_at`.
    pub fn update_text(
        conn: &Connection,
        id: &TaskId,
        updates: &TaskUpdateParams,
        now: &str,
    ) -> Result<bool> {
        let changed = conn.execute(
            "UPDATE tasks SET title = COALESCE(?2, title),
                              description = COALESCE(?3, description),
                              updated_at = ?4
             WHERE id = ?1",
            params![id.as_str(), updates.title, updates.description, now],
        )?;
        Ok(changed > 0)
    }

    /// Delete a task row. Returns `true` if a row was deleted.
    pub fn delete(conn: &Connection, id: &TaskId) -> Result<bool> {
        let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id.as_str()])?;
        Ok(changed > 0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
