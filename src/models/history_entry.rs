use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One audit-log row. Versions count up from 1 per (resource_type,
/// resource_id) pair.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub action: String,
    pub resource_type: String,
    pub resource_id: i64,
    pub version: i32,
    pub data: Option<serde_json::Value>,
    pub username: Option<String>,
    pub logged_at: DateTime<Utc>,
}
