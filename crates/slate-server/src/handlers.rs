//! Task API handlers.
//!
//! Handlers validate transport-level input — identifier format, column
//! values, JSON shape — and delegate ordering semantics to the store.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use slate_core::{
    Board, Column, MoveTaskParams, ReorderEntry, Task, TaskCreateParams, TaskId, TaskUpdateParams,
};

use crate::error::ApiError;
use crate::server::AppState;

fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    TaskId::parse(raw).map_err(|e| ApiError::validation(e.to_string()))
}

/// Query parameters for `GET /api/tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Restrict the listing to one column.
    pub column: Option<Column>,
}

/// Body for `PUT /api/tasks/reorder`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    /// Column being reordered.
    pub column: Column,
    /// New position for each listed task.
    pub tasks: Vec<ReorderEntry>,
}

/// GET /api/board — the three columns grouped, each in position order.
#[instrument(skip(state))]
pub async fn get_board(State(state): State<AppState>) -> Result<Json<Board>, ApiError> {
    Ok(Json(state.store.board()?))
}

/// GET /api/tasks — flat ordered listing, optionally filtered by column.
#[instrument(skip(state))]
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Value>, ApiError> {
    let tasks = match query.column {
        Some(column) => state.store.list_column(column)?,
        None => state.store.list_tasks()?,
    };
    Ok(Json(json!({ "tasks": tasks })))
}

/// POST /api/tasks — create a task, shifting if a position is given.
#[instrument(skip(state, params))]
pub async fn create_task(
    State(state): State<AppState>,
    Json(params): Json<TaskCreateParams>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.store.create_task(&params)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks/{id}
#[instrument(skip(state))]
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&id)?;
    Ok(Json(state.store.get_task(&id)?))
}

/// PATCH /api/tasks/{id} — update title and/or description.
#[instrument(skip(state, updates))]
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(updates): Json<TaskUpdateParams>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&id)?;
    Ok(Json(state.store.update_task(&id, &updates)?))
}

/// PUT /api/tasks/{id}/move — move within or across columns.
#[instrument(skip(state))]
pub async fn move_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(params): Json<MoveTaskParams>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&id)?;
    Ok(Json(state.store.move_task(&id, &params)?))
}

/// PUT /api/tasks/reorder — bulk reorder one column.
#[instrument(skip(state, request))]
pub async fn reorder_tasks(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Value>, ApiError> {
    let tasks = state.store.reorder_column(request.column, &request.tasks)?;
    Ok(Json(json!({ "tasks": tasks })))
}

/// DELETE /api/tasks/{id} — delete and compact the column.
#[instrument(skip(state))]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_task_id(&id)?;
    state.store.delete_task(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
