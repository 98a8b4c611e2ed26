use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::middleware::history;
use crate::models::TaskStatus;
use crate::routes::{ListQuery, Page};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateTaskStatus {
    pub name: String,
}

#[derive(Deserialize)]
pub struct UpdateTaskStatus {
    pub name: String,
    pub is_active: Option<bool>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<TaskStatus>>, AppError> {
    auth.require("ROLE_TASK_STATUS_LIST")?;

    let (limit, offset) = query.limits();
    let items = db::task_statuses::list(&state.pool, query.search(), limit, offset).await?;
    let total = db::task_statuses::count(&state.pool, query.search()).await?;
    Ok(Json(Page::new(items, total, &query)))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<TaskStatus>, AppError> {
    auth.require("ROLE_TASK_STATUS_SHOW")?;

    let status = db::task_statuses::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task status not found".to_string()))?;
    Ok(Json(status))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateTaskStatus>,
) -> Result<Json<TaskStatus>, AppError> {
    auth.require("ROLE_TASK_STATUS_CREATE")?;
    validate_name(&req.name)?;

    let status = db::task_statuses::create(&state.pool, &req.name, Some(&auth.username)).await?;

    history::record(
        &state.pool,
        "create",
        "task_status",
        status.id,
        serde_json::to_value(&status).ok(),
        Some(&auth.username),
    )
    .await;

    Ok(Json(status))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskStatus>,
) -> Result<Json<TaskStatus>, AppError> {
    auth.require("ROLE_TASK_STATUS_UPDATE")?;
    validate_name(&req.name)?;

    let status = db::task_statuses::update(
        &state.pool,
        id,
        &req.name,
        req.is_active.unwrap_or(true),
        Some(&auth.username),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Task status not found".to_string()),
        other => AppError::Database(other),
    })?;

    history::record(
        &state.pool,
        "update",
        "task_status",
        status.id,
        serde_json::to_value(&status).ok(),
        Some(&auth.username),
    )
    .await;

    Ok(Json(status))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require("ROLE_TASK_STATUS_DELETE")?;

    let deleted = db::task_statuses::delete(&state.pool, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Task status not found".to_string()));
    }

    history::record(
        &state.pool,
        "remove",
        "task_status",
        id,
        None,
        Some(&auth.username),
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation(
            "name",
            "invalid",
            "Name must not be blank",
        ));
    }
    Ok(())
}
