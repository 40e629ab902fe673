//! Demo-board seeding.

use tracing::info;

use slate_core::{Column, TaskCreateParams};
use slate_store::{BoardStore, Result};

const DEMO_TASKS: &[(&str, &str, Column)] = &[
    (
        "Sketch the onboarding flow",
        "Rough wireframes for the first-run experience.",
        Column::Todo,
    ),
    (
        "Write API integration tests",
        "Cover create, move and reorder end to end.",
        Column::Todo,
    ),
    ("Update the deployment runbook", "", Column::Todo),
    (
        "Implement board reordering",
        "Dense per-column ordering with shift-on-insert.",
        Column::InProgress,
    ),
    ("Review storage schema", "", Column::InProgress),
    (
        "Set up the project workspace",
        "Crate layout, lints, CI basics.",
        Column::Completed,
    ),
];

/// Populate the board with demo tasks.
///
/// Refuses to touch a non-empty board unless `force` is set; with `force`
/// the demo tasks append after whatever is already there.
pub fn run(store: &BoardStore, force: bool) -> Result<()> {
    let existing = store.list_tasks()?.len();
    if existing > 0 && !force {
        info!(existing, "board already has tasks; use --force to seed anyway");
        return Ok(());
    }

    for (title, description, column) in DEMO_TASKS {
        let _ = store.create_task(&TaskCreateParams {
            title: (*title).to_string(),
            description: (!description.is_empty()).then(|| (*description).to_string()),
            column: *column,
            order: None,
        })?;
    }

    info!(count = DEMO_TASKS.len(), "seeded demo board");
    Ok(())
}
