use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Blame, Stamps};

/// A customer account able to receive password reset emails. The reset token
/// lives directly on the row: one slot, overwritten on each reissue, cleared
/// when the password is changed downstream.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub token: Option<String>,
    pub token_created_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub stamps: Stamps,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub blame: Blame,
}
