use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Created/updated timestamps shared by every entity. Embedded into each
/// model rather than inherited.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Stamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Who created/last modified a record. Usernames, not foreign keys, so the
/// trail survives user deletion.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Blame {
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}
