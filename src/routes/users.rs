use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::middleware::history;
use crate::models::User;
use crate::routes::{ListQuery, Page};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub language_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub language_id: Option<i64>,
    pub is_active: Option<bool>,
    /// When present, the password is re-hashed and replaced.
    pub password: Option<String>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<User>>, AppError> {
    auth.require("ROLE_USER_LIST")?;

    let (limit, offset) = query.limits();
    let items = db::users::list(&state.pool, query.search(), limit, offset).await?;
    let total = db::users::count(&state.pool, query.search()).await?;
    Ok(Json(Page::new(items, total, &query)))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    auth.require("ROLE_USER_SHOW")?;

    let user = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateUser>,
) -> Result<Json<User>, AppError> {
    auth.require("ROLE_USER_CREATE")?;

    if req.username.is_empty() || !req.username.contains('@') {
        return Err(AppError::validation(
            "username",
            "invalid",
            "A valid email address is required",
        ));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let user = db::users::create(
        &state.pool,
        &req.username,
        &pw_hash,
        &req.name,
        &req.roles,
        req.language_id,
        Some(&auth.username),
    )
    .await
    .map_err(conflict_on_duplicate_username)?;

    history::record(
        &state.pool,
        "create",
        "user",
        user.id,
        serde_json::to_value(&user).ok(),
        Some(&auth.username),
    )
    .await;

    Ok(Json(user))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUser>,
) -> Result<Json<User>, AppError> {
    auth.require("ROLE_USER_UPDATE")?;

    // Reject a bad password before any column is written
    if let Some(new_password) = &req.password {
        if new_password.len() < 8 {
            return Err(AppError::BadRequest(
                "Password must be at least 8 characters".to_string(),
            ));
        }
    }

    let user = db::users::update(
        &state.pool,
        id,
        &req.username,
        &req.name,
        &req.roles,
        req.language_id,
        req.is_active.unwrap_or(true),
        Some(&auth.username),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("User not found".to_string()),
        other => conflict_on_duplicate_username(other),
    })?;

    if let Some(new_password) = &req.password {
        let pw_hash = password::hash(new_password).map_err(AppError::Internal)?;
        db::users::update_password(&state.pool, user.id, &pw_hash).await?;
    }

    history::record(
        &state.pool,
        "update",
        "user",
        user.id,
        serde_json::to_value(&user).ok(),
        Some(&auth.username),
    )
    .await;

    Ok(Json(user))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require("ROLE_USER_DELETE")?;

    let deleted = db::users::delete(&state.pool, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    history::record(&state.pool, "remove", "user", id, None, Some(&auth.username)).await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

fn conflict_on_duplicate_username(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A user with this username already exists".to_string())
        }
        _ => AppError::Database(e),
    }
}
