use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::Task;

pub async fn list(
    pool: &PgPool,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "SELECT * FROM tasks
         WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
         ORDER BY id DESC LIMIT $2 OFFSET $3",
    )
    .bind(search)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool, search: Option<&str>) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM tasks WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')",
    )
    .bind(search)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Active tasks due on or before the given date, assigned to the given user.
pub async fn list_due(
    pool: &PgPool,
    assignee_id: i64,
    on_or_before: NaiveDate,
) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "SELECT * FROM tasks
         WHERE assignee_id = $1 AND deadline <= $2 AND is_active = true
         ORDER BY deadline ASC, id DESC",
    )
    .bind(assignee_id)
    .bind(on_or_before)
    .fetch_all(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    name: &str,
    description: Option<&str>,
    project_id: i64,
    deadline: NaiveDate,
    assignee_id: Option<i64>,
    status_id: Option<i64>,
    time_estimated: f64,
    actor: Option<&str>,
) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (name, description, project_id, deadline, assignee_id, status_id,
             time_estimated, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) RETURNING *",
    )
    .bind(name)
    .bind(description)
    .bind(project_id)
    .bind(deadline)
    .bind(assignee_id)
    .bind(status_id)
    .bind(time_estimated)
    .bind(actor)
    .fetch_one(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &PgPool,
    id: i64,
    name: &str,
    description: Option<&str>,
    project_id: i64,
    deadline: NaiveDate,
    assignee_id: Option<i64>,
    status_id: Option<i64>,
    time_estimated: f64,
    time_spent: f64,
    is_active: bool,
    actor: Option<&str>,
) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "UPDATE tasks SET name = $2, description = $3, project_id = $4, deadline = $5,
             assignee_id = $6, status_id = $7, time_estimated = $8, time_spent = $9,
             is_active = $10, updated_by = $11, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(project_id)
    .bind(deadline)
    .bind(assignee_id)
    .bind(status_id)
    .bind(time_estimated)
    .bind(time_spent)
    .bind(is_active)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
