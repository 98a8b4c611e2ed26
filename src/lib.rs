pub mod config;
pub mod error;
pub mod state;
pub mod auth;
pub mod db;
pub mod models;
pub mod middleware;
pub mod routes;
pub mod email;
pub mod rate_limit;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use sqlx::PgPool;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::{LogMailer, Mailer, SystemMailer};
use crate::rate_limit::LoginRateLimiter;
use crate::state::{AppState, SharedState};

/// Build the router with a mailer chosen from configuration: real SMTP when
/// configured, otherwise a log-only fallback.
pub fn build_app(pool: PgPool, config: Config) -> Router {
    let mailer: Arc<dyn Mailer> = match config.smtp.as_ref() {
        Some(smtp) => match SystemMailer::new(smtp) {
            Ok(mailer) => {
                tracing::info!("System SMTP configured");
                Arc::new(mailer)
            }
            Err(e) => {
                tracing::warn!("System SMTP not available: {e}");
                Arc::new(LogMailer)
            }
        },
        None => Arc::new(LogMailer),
    };

    build_app_with_mailer(pool, config, mailer)
}

pub fn build_app_with_mailer(pool: PgPool, config: Config, mailer: Arc<dyn Mailer>) -> Router {
    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        mailer,
        login_limiter: LoginRateLimiter::new(),
    });

    // Hourly sweep of stale login-limiter entries
    let sweep_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;
            sweep_state
                .login_limiter
                .cleanup(std::time::Duration::from_secs(3600));
        }
    });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
