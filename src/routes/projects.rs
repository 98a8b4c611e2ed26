use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::middleware::history;
use crate::models::Project;
use crate::routes::{ListQuery, Page};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub client_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdateProject {
    pub name: String,
    pub client_id: Option<i64>,
    pub is_active: Option<bool>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Project>>, AppError> {
    auth.require("ROLE_PROJECT_LIST")?;

    let (limit, offset) = query.limits();
    let items = db::projects::list(&state.pool, query.search(), limit, offset).await?;
    let total = db::projects::count(&state.pool, query.search()).await?;
    Ok(Json(Page::new(items, total, &query)))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, AppError> {
    auth.require("ROLE_PROJECT_SHOW")?;

    let project = db::projects::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateProject>,
) -> Result<Json<Project>, AppError> {
    auth.require("ROLE_PROJECT_CREATE")?;
    validate_name(&req.name)?;

    let project = db::projects::create(
        &state.pool,
        &req.name,
        req.client_id,
        Some(&auth.username),
    )
    .await
    .map_err(missing_client)?;

    history::record(
        &state.pool,
        "create",
        "project",
        project.id,
        serde_json::to_value(&project).ok(),
        Some(&auth.username),
    )
    .await;

    Ok(Json(project))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProject>,
) -> Result<Json<Project>, AppError> {
    auth.require("ROLE_PROJECT_UPDATE")?;
    validate_name(&req.name)?;

    let project = db::projects::update(
        &state.pool,
        id,
        &req.name,
        req.client_id,
        req.is_active.unwrap_or(true),
        Some(&auth.username),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Project not found".to_string()),
        other => missing_client(other),
    })?;

    history::record(
        &state.pool,
        "update",
        "project",
        project.id,
        serde_json::to_value(&project).ok(),
        Some(&auth.username),
    )
    .await;

    Ok(Json(project))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require("ROLE_PROJECT_DELETE")?;

    let deleted = db::projects::delete(&state.pool, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Project not found".to_string()));
    }

    history::record(
        &state.pool,
        "remove",
        "project",
        id,
        None,
        Some(&auth.username),
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

fn missing_client(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::BadRequest("Referenced client does not exist".to_string())
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
