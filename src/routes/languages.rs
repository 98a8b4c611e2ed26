use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::middleware::history;
use crate::models::Language;
use crate::routes::{ListQuery, Page};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateLanguage {
    pub name: String,
    pub code: String,
}

#[derive(Deserialize)]
pub struct UpdateLanguage {
    pub name: String,
    pub code: String,
    pub is_active: Option<bool>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Language>>, AppError> {
    auth.require("ROLE_LANGUAGE_LIST")?;

    let (limit, offset) = query.limits();
    let items = db::languages::list(&state.pool, query.search(), limit, offset).await?;
    let total = db::languages::count(&state.pool, query.search()).await?;
    Ok(Json(Page::new(items, total, &query)))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Language>, AppError> {
    auth.require("ROLE_LANGUAGE_SHOW")?;

    let language = db::languages::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Language not found".to_string()))?;
    Ok(Json(language))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateLanguage>,
) -> Result<Json<Language>, AppError> {
    auth.require("ROLE_LANGUAGE_CREATE")?;
    validate(&req.name, &req.code)?;

    let language = db::languages::create(&state.pool, &req.name, &req.code, Some(&auth.username))
        .await?;

    history::record(
        &state.pool,
        "create",
        "language",
        language.id,
        serde_json::to_value(&language).ok(),
        Some(&auth.username),
    )
    .await;

    Ok(Json(language))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateLanguage>,
) -> Result<Json<Language>, AppError> {
    auth.require("ROLE_LANGUAGE_UPDATE")?;
    validate(&req.name, &req.code)?;

    let language = db::languages::update(
        &state.pool,
        id,
        &req.name,
        &req.code,
        req.is_active.unwrap_or(true),
        Some(&auth.username),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Language not found".to_string()),
        other => AppError::Database(other),
    })?;

    history::record(
        &state.pool,
        "update",
        "language",
        language.id,
        serde_json::to_value(&language).ok(),
        Some(&auth.username),
    )
    .await;

    Ok(Json(language))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require("ROLE_LANGUAGE_DELETE")?;

    let deleted = db::languages::delete(&state.pool, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Language not found".to_string()));
    }

    history::record(
        &state.pool,
        "remove",
        "language",
        id,
        None,
        Some(&auth.username),
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

fn validate(name: &str, code: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation(
            "name",
            "invalid",
            "Name must not be blank",
        ));
    }
    if code.trim().is_empty() {
        return Err(AppError::validation(
            "code",
            "invalid",
            "Code must not be blank",
        ));
    }
    Ok(())
}
