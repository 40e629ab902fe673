//! End-to-end router tests: every route, the error-status mapping, and the
//! board scenarios, driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use slate_server::{AppState, router};
use slate_store::BoardStore;

fn make_app() -> Router {
    let store = Arc::new(BoardStore::in_memory().unwrap());
    router(AppState::new(store))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1_000_000)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create(app: &Router, title: &str, column: &str, order: Option<u32>) -> Value {
    let mut body = json!({ "title": title, "column": column });
    if let Some(order) = order {
        body["order"] = json!(order);
    }
    let (status, task) = send(app, "POST", "/api/tasks", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {task}");
    task
}

async fn column_titles(app: &Router, column: &str) -> Vec<String> {
    let (status, body) = send(app, "GET", &format!("/api/tasks?column={column}"), None).await;
    assert_eq!(status, StatusCode::OK);
    body["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = make_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["uptime_secs"].is_number());
}

#[tokio::test]
async fn metrics_route_exists() {
    let app = make_app();
    let (status, _) = send(&app, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = make_app();
    let (status, _) = send(&app, "GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_task_returns_201_with_task() {
    let app = make_app();
    let task = create(&app, "Write the launch checklist", "todo", None).await;
    assert!(task["id"].as_str().unwrap().starts_with("task-"));
    assert_eq!(task["title"], "Write the launch checklist");
    assert_eq!(task["column"], "todo");
    assert_eq!(task["order"], 1);
    assert_eq!(task["description"], "");
    assert!(task["createdAt"].is_string());
    assert_eq!(task["createdAt"], task["updatedAt"]);
}

#[tokio::test]
async fn create_short_title_is_422_validation() {
    let app = make_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({ "title": "abc", "column": "todo" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION");
}

#[tokio::test]
async fn create_unknown_column_is_rejected_before_engine() {
    let app = make_app();
    let (status, _) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({ "title": "Valid enough title", "column": "blocked" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_task_roundtrip() {
    let app = make_app();
    let task = create(&app, "Review the pull request", "in-progress", None).await;
    let id = task["id"].as_str().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, task);
}

#[tokio::test]
async fn get_unknown_task_is_404() {
    let app = make_app();
    let (status, body) = send(
        &app,
        "GET",
        "/api/tasks/task-0195f2b4-0000-7000-8000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_task_id_is_422() {
    let app = make_app();
    let (status, body) = send(&app, "GET", "/api/tasks/not-an-id", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION");
}

#[tokio::test]
async fn patch_updates_title_and_description() {
    let app = make_app();
    let task = create(&app, "Original task title", "todo", None).await;
    let id = task["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/api/tasks/{id}"),
        Some(json!({ "title": "Renamed task title", "description": "now with detail" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Renamed task title");
    assert_eq!(updated["description"], "now with detail");
    assert_eq!(updated["order"], task["order"]);
}

#[tokio::test]
async fn insert_at_position_shifts_rest() {
    // Scenario: A(1), B(2); insert at 1 → New=1, A=2, B=3.
    let app = make_app();
    let _ = create(&app, "Task A on board", "todo", None).await;
    let _ = create(&app, "Task B on board", "todo", None).await;
    let inserted = create(&app, "New task first", "todo", Some(1)).await;

    assert_eq!(inserted["order"], 1);
    assert_eq!(
        column_titles(&app, "todo").await,
        vec!["New task first", "Task A on board", "Task B on board"]
    );
}

#[tokio::test]
async fn move_within_column_scenario() {
    // Scenario: A(1), B(2), C(3); move B → 3 yields A=1, C=2, B=3.
    let app = make_app();
    let _ = create(&app, "Task A on board", "todo", None).await;
    let b = create(&app, "Task B on board", "todo", None).await;
    let _ = create(&app, "Task C on board", "todo", None).await;
    let id = b["id"].as_str().unwrap();

    let (status, moved) = send(
        &app,
        "PUT",
        &format!("/api/tasks/{id}/move"),
        Some(json!({ "column": "todo", "order": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["order"], 3);
    assert_eq!(
        column_titles(&app, "todo").await,
        vec!["Task A on board", "Task C on board", "Task B on board"]
    );
}

#[tokio::test]
async fn move_across_columns() {
    let app = make_app();
    let a = create(&app, "Task A on board", "todo", None).await;
    let _ = create(&app, "Task B on board", "todo", None).await;
    let _ = create(&app, "Task X underway", "in-progress", None).await;
    let id = a["id"].as_str().unwrap();

    let (status, moved) = send(
        &app,
        "PUT",
        &format!("/api/tasks/{id}/move"),
        Some(json!({ "column": "in-progress", "order": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["column"], "in-progress");
    assert_eq!(moved["order"], 1);

    assert_eq!(column_titles(&app, "todo").await, vec!["Task B on board"]);
    assert_eq!(
        column_titles(&app, "in-progress").await,
        vec!["Task A on board", "Task X underway"]
    );
}

#[tokio::test]
async fn delete_returns_204_and_compacts() {
    // Scenario: A(1), B(2), C(3); delete B → A=1, C=2.
    let app = make_app();
    let _ = create(&app, "Task A on board", "todo", None).await;
    let b = create(&app, "Task B on board", "todo", None).await;
    let _ = create(&app, "Task C on board", "todo", None).await;
    let id = b["id"].as_str().unwrap();

    let (status, _) = send(&app, "DELETE", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/api/tasks?column=todo", None).await;
    let orders: Vec<u64> = body["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["order"].as_u64().unwrap())
        .collect();
    assert_eq!(orders, vec![1, 2]);
}

#[tokio::test]
async fn delete_unknown_task_is_404() {
    let app = make_app();
    let (status, _) = send(
        &app,
        "DELETE",
        "/api/tasks/task-0195f2b4-0000-7000-8000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reorder_applies_permutation() {
    let app = make_app();
    let a = create(&app, "Task A on board", "todo", None).await;
    let b = create(&app, "Task B on board", "todo", None).await;
    let c = create(&app, "Task C on board", "todo", None).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/api/tasks/reorder",
        Some(json!({
            "column": "todo",
            "tasks": [
                { "id": c["id"], "order": 1 },
                { "id": a["id"], "order": 2 },
                { "id": b["id"], "order": 3 },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<&str> = body["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Task C on board", "Task A on board", "Task B on board"]
    );
}

#[tokio::test]
async fn reorder_collision_is_409_conflict() {
    let app = make_app();
    let a = create(&app, "Task A on board", "todo", None).await;
    let b = create(&app, "Task B on board", "todo", None).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/api/tasks/reorder",
        Some(json!({
            "column": "todo",
            "tasks": [
                { "id": a["id"], "order": 2 },
                { "id": b["id"], "order": 2 },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    // Rolled back: original order intact.
    assert_eq!(
        column_titles(&app, "todo").await,
        vec!["Task A on board", "Task B on board"]
    );
}

#[tokio::test]
async fn board_groups_columns_in_order() {
    let app = make_app();
    let _ = create(&app, "Upcoming task one", "todo", None).await;
    let _ = create(&app, "Upcoming task two", "todo", None).await;
    let _ = create(&app, "Current task one", "in-progress", None).await;
    let _ = create(&app, "Finished task one", "completed", None).await;

    let (status, board) = send(&app, "GET", "/api/board", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["todo"].as_array().unwrap().len(), 2);
    assert_eq!(board["inProgress"].as_array().unwrap().len(), 1);
    assert_eq!(board["completed"].as_array().unwrap().len(), 1);
    assert_eq!(board["todo"][0]["title"], "Upcoming task one");
}

#[tokio::test]
async fn list_without_filter_returns_all() {
    let app = make_app();
    let _ = create(&app, "Upcoming task one", "todo", None).await;
    let _ = create(&app, "Finished task one", "completed", None).await;

    let (status, body) = send(&app, "GET", "/api/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tasks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn move_zero_order_is_422() {
    let app = make_app();
    let a = create(&app, "Task A on board", "todo", None).await;
    let id = a["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/tasks/{id}/move"),
        Some(json!({ "column": "todo", "order": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION");
}
