use sqlx::PgPool;

/// Record a history entry. Called explicitly in handlers after mutations.
/// Failures are logged, never surfaced: the mutation itself already
/// succeeded.
pub async fn record(
    pool: &PgPool,
    action: &str,
    resource_type: &str,
    resource_id: i64,
    data: Option<serde_json::Value>,
    username: Option<&str>,
) {
    if let Err(e) =
        crate::db::history::append(pool, action, resource_type, resource_id, data, username).await
    {
        tracing::error!("Failed to record history entry: {e}");
    }
}
