use serde::{Deserialize, Serialize};

use crate::models::{Blame, Stamps};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Language {
    pub id: i64,
    pub name: String,
    /// ISO 639-1 code, e.g. "en".
    pub code: String,
    pub is_active: bool,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub stamps: Stamps,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub blame: Blame,
}
