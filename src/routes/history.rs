use axum::Json;
use axum::extract::{Path, State};

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::HistoryEntry;
use crate::state::SharedState;

const KNOWN_RESOURCES: &[&str] = &["client", "user", "task", "project", "language", "task_status"];

/// Audit trail for a single record, newest version first.
pub async fn list_for_resource(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path((resource, id)): Path<(String, i64)>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    auth.require("ROLE_HISTORY_LIST")?;

    if !KNOWN_RESOURCES.contains(&resource.as_str()) {
        return Err(AppError::NotFound(format!(
            "Unknown resource type: {resource}"
        )));
    }

    let entries = db::history::list_for_resource(&state.pool, &resource, id).await?;
    Ok(Json(entries))
}
