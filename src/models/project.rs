use serde::{Deserialize, Serialize};

use crate::models::{Blame, Stamps};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub client_id: Option<i64>,
    pub is_active: bool,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub stamps: Stamps,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub blame: Blame,
}
