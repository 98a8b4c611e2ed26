use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Blame, Stamps};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub project_id: i64,
    pub deadline: NaiveDate,
    pub assignee_id: Option<i64>,
    pub status_id: Option<i64>,
    pub time_estimated: f64,
    pub time_spent: f64,
    pub is_active: bool,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub stamps: Stamps,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub blame: Blame,
}
