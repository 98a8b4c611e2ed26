use sqlx::PgPool;

use crate::models::HistoryEntry;

/// Append an audit entry. A per-record advisory lock serializes version
/// assignment so concurrent writers cannot read the same MAX(version); the
/// unique index on (resource_type, resource_id, version) backstops it.
pub async fn append(
    pool: &PgPool,
    action: &str,
    resource_type: &str,
    resource_id: i64,
    data: Option<serde_json::Value>,
    username: Option<&str>,
) -> Result<HistoryEntry, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1 || ':' || $2::text, 0))")
        .bind(resource_type)
        .bind(resource_id)
        .execute(&mut *tx)
        .await?;

    let entry = sqlx::query_as::<_, HistoryEntry>(
        "INSERT INTO history (action, resource_type, resource_id, version, data, username)
         SELECT $1, $2, $3, COALESCE(MAX(version), 0) + 1, $4, $5
         FROM history WHERE resource_type = $2 AND resource_id = $3
         RETURNING *",
    )
    .bind(action)
    .bind(resource_type)
    .bind(resource_id)
    .bind(data)
    .bind(username)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(entry)
}

pub async fn list_for_resource(
    pool: &PgPool,
    resource_type: &str,
    resource_id: i64,
) -> Result<Vec<HistoryEntry>, sqlx::Error> {
    sqlx::query_as::<_, HistoryEntry>(
        "SELECT * FROM history WHERE resource_type = $1 AND resource_id = $2
         ORDER BY version DESC",
    )
    .bind(resource_type)
    .bind(resource_id)
    .fetch_all(pool)
    .await
}
