use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::middleware::history;
use crate::models::Task;
use crate::routes::{ListQuery, Page};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateTask {
    pub name: String,
    pub description: Option<String>,
    pub project_id: i64,
    pub deadline: NaiveDate,
    pub assignee_id: Option<i64>,
    pub status_id: Option<i64>,
    #[serde(default)]
    pub time_estimated: f64,
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub name: String,
    pub description: Option<String>,
    pub project_id: i64,
    pub deadline: NaiveDate,
    pub assignee_id: Option<i64>,
    pub status_id: Option<i64>,
    #[serde(default)]
    pub time_estimated: f64,
    #[serde(default)]
    pub time_spent: f64,
    pub is_active: Option<bool>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Task>>, AppError> {
    auth.require("ROLE_TASK_LIST")?;

    let (limit, offset) = query.limits();
    let items = db::tasks::list(&state.pool, query.search(), limit, offset).await?;
    let total = db::tasks::count(&state.pool, query.search()).await?;
    Ok(Json(Page::new(items, total, &query)))
}

/// Active tasks assigned to the caller with a deadline today or earlier.
pub async fn deadline(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Task>>, AppError> {
    auth.require("ROLE_TASK_DEADLINE")?;

    let today = Utc::now().date_naive();
    let tasks = db::tasks::list_due(&state.pool, auth.user_id, today).await?;
    Ok(Json(tasks))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, AppError> {
    auth.require("ROLE_TASK_SHOW")?;

    let task = db::tasks::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;
    Ok(Json(task))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateTask>,
) -> Result<Json<Task>, AppError> {
    auth.require("ROLE_TASK_CREATE")?;
    validate_name(&req.name)?;

    let task = db::tasks::create(
        &state.pool,
        &req.name,
        req.description.as_deref(),
        req.project_id,
        req.deadline,
        req.assignee_id,
        req.status_id,
        req.time_estimated,
        Some(&auth.username),
    )
    .await
    .map_err(missing_reference)?;

    history::record(
        &state.pool,
        "create",
        "task",
        task.id,
        serde_json::to_value(&task).ok(),
        Some(&auth.username),
    )
    .await;

    Ok(Json(task))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTask>,
) -> Result<Json<Task>, AppError> {
    auth.require("ROLE_TASK_UPDATE")?;
    validate_name(&req.name)?;

    let task = db::tasks::update(
        &state.pool,
        id,
        &req.name,
        req.description.as_deref(),
        req.project_id,
        req.deadline,
        req.assignee_id,
        req.status_id,
        req.time_estimated,
        req.time_spent,
        req.is_active.unwrap_or(true),
        Some(&auth.username),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Task not found".to_string()),
        other => missing_reference(other),
    })?;

    history::record(
        &state.pool,
        "update",
        "task",
        task.id,
        serde_json::to_value(&task).ok(),
        Some(&auth.username),
    )
    .await;

    Ok(Json(task))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require("ROLE_TASK_DELETE")?;

    let deleted = db::tasks::delete(&state.pool, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Task not found".to_string()));
    }

    history::record(&state.pool, "remove", "task", id, None, Some(&auth.username)).await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

fn missing_reference(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::BadRequest("Referenced project, user or status does not exist".to_string())
        }
        _ => AppError::Database(e),
    }
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
