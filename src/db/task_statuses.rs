use sqlx::PgPool;

use crate::models::TaskStatus;

pub async fn list(
    pool: &PgPool,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<TaskStatus>, sqlx::Error> {
    sqlx::query_as::<_, TaskStatus>(
        "SELECT * FROM task_statuses
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
        "SELECT COUNT(*) FROM task_statuses WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')",
    )
    .bind(search)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<TaskStatus>, sqlx::Error> {
    sqlx::query_as::<_, TaskStatus>("SELECT * FROM task_statuses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    name: &str,
    actor: Option<&str>,
) -> Result<TaskStatus, sqlx::Error> {
    sqlx::query_as::<_, TaskStatus>(
        "INSERT INTO task_statuses (name, created_by, updated_by)
         VALUES ($1, $2, $2) RETURNING *",
    )
    .bind(name)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    name: &str,
    is_active: bool,
    actor: Option<&str>,
) -> Result<TaskStatus, sqlx::Error> {
    sqlx::query_as::<_, TaskStatus>(
        "UPDATE task_statuses SET name = $2, is_active = $3,
             updated_by = $4, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(is_active)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM task_statuses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
