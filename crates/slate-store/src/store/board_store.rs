//! `BoardStore` — the ordering engine.
//!
//! Composes [`TaskRepo`] primitives into the board operations, keeping every
//! column's positions dense (1..N, no gaps) and unique. Key rules:
//!
//! - **One transaction per operation**: a caller never observes a
//!   half-shifted column; a failure rolls back to the pre-operation state.
//! - **Per-column write locks**: operations on the same column are
//!   serialized in-process; disjoint columns proceed concurrently. Cross-
//!   column moves take both locks in `Column::ALL` order.
//! - **The unique index stays the backstop**: a writer outside these locks
//!   surfaces as [`BoardError::Conflict`], never as silent corruption.
//!
//! The store holds no cached task state — every operation reads current
//! state inside its own transaction.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use metrics::counter;
use rusqlite::Connection;
use tracing::instrument;

use slate_core::{
    Board, Column, MIN_TITLE_LEN, MoveTaskParams, ReorderEntry, Task, TaskCreateParams, TaskId,
    TaskUpdateParams,
};

use crate::errors::{BoardError, Result};
use crate::sqlite::connection::{self, ConnectionConfig, ConnectionPool};
use crate::sqlite::migrations::run_migrations;
use crate::sqlite::repo::TaskRepo;

/// High-level board store wrapping a connection pool.
pub struct BoardStore {
    pool: ConnectionPool,
    column_locks: [Mutex<()>; Column::ALL.len()],
}

impl BoardStore {
    /// Create a store over an existing pool, running pending migrations.
    pub fn new(pool: ConnectionPool) -> Result<Self> {
        let conn = pool.get()?;
        let _ = run_migrations(&conn)?;
        drop(conn);
        Ok(Self {
            pool,
            column_locks: [Mutex::new(()), Mutex::new(()), Mutex::new(())],
        })
    }

    /// Open a file-backed store, creating the database if needed.
    pub fn open(path: &Path) -> Result<Self> {
        Self::new(connection::new_file(path, &ConnectionConfig::default())?)
    }

    /// Open an in-memory store (tests, demos).
    pub fn in_memory() -> Result<Self> {
        Self::new(connection::new_in_memory(&ConnectionConfig::default())?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────

    /// Get a task by ID.
    pub fn get_task(&self, id: &TaskId) -> Result<Task> {
        let conn = self.pool.get()?;
        TaskRepo::get(&conn, id)?.ok_or_else(|| BoardError::task_not_found(id.as_str()))
    }

    /// List every task, ordered by column then position.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        let conn = self.pool.get()?;
        TaskRepo::list(&conn)
    }

    /// List a column's tasks in position order.
    pub fn list_column(&self, column: Column) -> Result<Vec<Task>> {
        let conn = self.pool.get()?;
        TaskRepo::list_column(&conn, column)
    }

    /// The full board grouped by column.
    pub fn board(&self) -> Result<Board> {
        let mut board = Board::default();
        for task in self.list_tasks()? {
            match task.column {
                Column::Todo => board.todo.push(task),
                Column::InProgress => board.in_progress.push(task),
                Column::Completed => board.completed.push(task),
            }
        }
        Ok(board)
    }

    /// Next free position in a column: `max + 1`, or 1 when empty.
    pub fn next_order(&self, column: Column) -> Result<u32> {
        let conn = self.pool.get()?;
        Ok(TaskRepo::max_order(&conn, column)? + 1)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────

    /// Create a task.
    ///
    /// With an explicit position `k`, every task at or after `k` shifts up
    /// one before the insert, so uniqueness holds at every observable point.
    /// A position beyond the end of the column is accepted as a sparse new
    /// maximum. Without a position, the task appends at `max + 1`.
    #[instrument(skip(self, params), fields(column = %params.column))]
    pub fn create_task(&self, params: &TaskCreateParams) -> Result<Task> {
        let title = validated_title(&params.title)?;
        if params.order == Some(0) {
            return Err(BoardError::Validation(
                "order must be a positive integer".to_string(),
            ));
        }

        let _guard = self.lock_column(params.column)?;
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        let now = now_rfc3339();

        let order = match params.order {
            Some(k) => {
                let _ = TaskRepo::shift_up(&tx, params.column, k, None, &now)?;
                k
            }
            None => TaskRepo::max_order(&tx, params.column)? + 1,
        };

        let task = Task {
            id: TaskId::generate(),
            title,
            description: params.description.clone().unwrap_or_default(),
            column: params.column,
            order,
            created_at: now.clone(),
            updated_at: now,
        };
        TaskRepo::insert(&tx, &task)?;
        tx.commit()?;

        counter!("board_ops_total", "op" => "create").increment(1);
        Ok(task)
    }

    /// Patch a task's title and/or description.
    #[instrument(skip(self, updates), fields(task_id = %id))]
    pub fn update_task(&self, id: &TaskId, updates: &TaskUpdateParams) -> Result<Task> {
        let updates = TaskUpdateParams {
            title: match &updates.title {
                Some(title) => Some(validated_title(title)?),
                None => None,
            },
            description: updates.description.clone(),
        };

        let conn = self.pool.get()?;
        let now = now_rfc3339();
        if !TaskRepo::update_text(&conn, id, &updates, &now)? {
            return Err(BoardError::task_not_found(id.as_str()));
        }

        counter!("board_ops_total", "op" => "update").increment(1);
        TaskRepo::get(&conn, id)?.ok_or_else(|| BoardError::task_not_found(id.as_str()))
    }

    /// Delete a task, then close the gap it leaves: every task in the same
    /// column with a greater position moves down one.
    #[instrument(skip(self), fields(task_id = %id))]
    pub fn delete_task(&self, id: &TaskId) -> Result<()> {
        loop {
            let column = self.get_task(id)?.column;
            let _guard = self.lock_column(column)?;
            let mut conn = self.pool.get()?;
            let tx = conn.transaction()?;

            let task = TaskRepo::get(&tx, id)?
                .ok_or_else(|| BoardError::task_not_found(id.as_str()))?;
            if task.column != column {
                // Lost a race with a cross-column move; lock the new column.
                continue;
            }

            let now = now_rfc3339();
            let _ = TaskRepo::delete(&tx, id)?;
            let _ = TaskRepo::shift_down(&tx, task.column, task.order, None, &now)?;
            tx.commit()?;

            counter!("board_ops_total", "op" => "delete").increment(1);
            return Ok(());
        }
    }

    /// Move a task to a target column and position.
    ///
    /// Within a column this is a rotation of the positions between the old
    /// and new slot; across columns the source gap closes and a target slot
    /// opens before the task's new placement is written.
    #[instrument(skip(self), fields(task_id = %id, target = %params.column, order = params.order))]
    pub fn move_task(&self, id: &TaskId, params: &MoveTaskParams) -> Result<Task> {
        if params.order == 0 {
            return Err(BoardError::Validation(
                "order must be a positive integer".to_string(),
            ));
        }

        loop {
            let current = self.get_task(id)?;
            let _guards: (MutexGuard<'_, ()>, Option<MutexGuard<'_, ()>>) =
                if current.column == params.column {
                    (self.lock_column(params.column)?, None)
                } else {
                    let (first, second) = ordered_pair(current.column, params.column);
                    (self.lock_column(first)?, Some(self.lock_column(second)?))
                };
            let mut conn = self.pool.get()?;
            let tx = conn.transaction()?;

            let task = TaskRepo::get(&tx, id)?
                .ok_or_else(|| BoardError::task_not_found(id.as_str()))?;
            if task.column != current.column {
                // Lost a race with a cross-column move; redo with fresh locks.
                continue;
            }

            let now = now_rfc3339();
            if task.column == params.column {
                move_within(&tx, &task, params.order, &now)?;
            } else {
                move_across(&tx, &task, params.column, params.order, &now)?;
            }
            let moved = TaskRepo::get(&tx, id)?
                .ok_or_else(|| BoardError::task_not_found(id.as_str()))?;
            tx.commit()?;

            counter!("board_ops_total", "op" => "move").increment(1);
            return Ok(moved);
        }
    }

    /// Apply a bulk reorder to one column.
    ///
    /// Each (task, position) entry is applied unconditionally — no shifting
    /// of unlisted tasks, no cross-entry validation. The whole batch runs in
    /// one transaction: a malformed permutation trips the unique index and
    /// rolls back with nothing applied. Returns the column in final order.
    #[instrument(skip(self, entries), fields(column = %column, entries = entries.len()))]
    pub fn reorder_column(&self, column: Column, entries: &[ReorderEntry]) -> Result<Vec<Task>> {
        if entries.iter().any(|e| e.order == 0) {
            return Err(BoardError::Validation(
                "order must be a positive integer".to_string(),
            ));
        }

        let _guard = self.lock_column(column)?;
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        let now = now_rfc3339();

        for entry in entries {
            if !TaskRepo::stage_order(&tx, &entry.id, column, entry.order, &now)? {
                return Err(BoardError::task_not_found(entry.id.as_str()));
            }
        }
        let _ = TaskRepo::flip_parked(&tx, column)?;

        let tasks = TaskRepo::list_column(&tx, column)?;
        tx.commit()?;

        counter!("board_ops_total", "op" => "reorder").increment(1);
        Ok(tasks)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internal
    // ─────────────────────────────────────────────────────────────────────

    fn lock_column(&self, column: Column) -> Result<MutexGuard<'_, ()>> {
        self.column_locks[column.index()]
            .lock()
            .map_err(|_| BoardError::Internal("column lock poisoned".to_string()))
    }
}

/// Rotate the moved task within its column: park it, shift the slots between
/// old and new position by one, place it at the target.
fn move_within(conn: &Connection, task: &Task, target: u32, now: &str) -> Result<()> {
    if target == task.order {
        // No-op move still counts as a successful update.
        return Ok(());
    }

    let _ = TaskRepo::park(conn, &task.id)?;
    if target < task.order {
        // Moving earlier: [target, old) makes room by moving up.
        let _ = TaskRepo::shift_up(conn, task.column, target, Some(task.order), now)?;
    } else {
        // Moving later: (old, target] closes the gap by moving down.
        let _ = TaskRepo::shift_down(conn, task.column, task.order, Some(target), now)?;
    }
    place(conn, task, task.column, target, now)
}

/// Move the task across columns: park it, close the source gap, open the
/// target slot, then write the new placement. Both shifts complete before
/// the moved task's new identity commits.
fn move_across(
    conn: &Connection,
    task: &Task,
    target_column: Column,
    target: u32,
    now: &str,
) -> Result<()> {
    let _ = TaskRepo::park(conn, &task.id)?;
    let _ = TaskRepo::shift_down(conn, task.column, task.order, None, now)?;
    let _ = TaskRepo::shift_up(conn, target_column, target, None, now)?;
    place(conn, task, target_column, target, now)
}

fn place(conn: &Connection, task: &Task, column: Column, order: u32, now: &str) -> Result<()> {
    if TaskRepo::set_placement(conn, &task.id, column, order, now)? {
        Ok(())
    } else {
        Err(BoardError::Internal(format!(
            "task vanished mid-move: {}",
            task.id
        )))
    }
}

/// Trim and validate a title.
fn validated_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.chars().count() < MIN_TITLE_LEN {
        return Err(BoardError::Validation(format!(
            "title must be at least {MIN_TITLE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn ordered_pair(a: Column, b: Column) -> (Column, Column) {
    if a.index() < b.index() { (a, b) } else { (b, a) }
}

fn now_rfc3339() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
