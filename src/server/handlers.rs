//! Route handlers for the task resource.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use todo_store::{NewTask, TaskPatch, TaskRecord};

use super::error::ApiError;
use super::AppState;

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// List every task in insertion order
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TaskRecord>>, ApiError> {
    let tasks = state.store.list_all().await.map_err(ApiError::read)?;
    Ok(Json(tasks))
}

/// Create a task from `{"text": ...}`
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewTask>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskRecord>), ApiError> {
    let Json(new_task) = body.map_err(ApiError::from_rejection)?;
    let text = new_task.text.unwrap_or_default();

    let task = state.store.create(&text).await.map_err(ApiError::write)?;
    tracing::info!(task_id = %task.id, "Created task");
    Ok((StatusCode::CREATED, Json(task)))
}

/// Merge the request body into the task with the given id
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<TaskRecord>, ApiError> {
    let Json(patch) = body.map_err(ApiError::from_rejection)?;

    let task = state
        .store
        .update_by_id(&id, &patch)
        .await
        .map_err(ApiError::write)?;
    Ok(Json(task))
}

/// Delete the task with the given id; deleting a missing id also succeeds
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let existed = state
        .store
        .delete_by_id(&id)
        .await
        .map_err(ApiError::write)?;
    if existed {
        tracing::info!(task_id = %id, "Deleted task");
    }
    Ok(StatusCode::NO_CONTENT)
}
