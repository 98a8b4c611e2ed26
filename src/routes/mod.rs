pub mod auth;
pub mod clients;
pub mod history;
pub mod languages;
pub mod projects;
pub mod task_statuses;
pub mod tasks;
pub mod users;

use axum::Router;
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};

use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
}

impl ListQuery {
    /// Returns (limit, offset) with per_page clamped to 1..=100.
    pub fn limits(&self) -> (i64, i64) {
        let per_page = self.per_page.unwrap_or(30).clamp(1, 100);
        let page = self.page.unwrap_or(1).max(1);
        (per_page, (page - 1) * per_page)
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }
}

#[derive(Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, query: &ListQuery) -> Self {
        let (per_page, _) = query.limits();
        let page = query.page.unwrap_or(1).max(1);
        Self {
            items,
            total,
            page,
            per_page,
            total_pages: (total + per_page - 1) / per_page,
        }
    }
}

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        // Clients
        .route(
            "/api/v1/clients",
            get(clients::list).post(clients::create),
        )
        .route(
            "/api/v1/clients/remind-password",
            post(clients::remind_password),
        )
        .route(
            "/api/v1/clients/{id}",
            get(clients::get)
                .put(clients::update)
                .delete(clients::delete),
        )
        // Users
        .route("/api/v1/users", get(users::list).post(users::create))
        .route(
            "/api/v1/users/{id}",
            get(users::get).put(users::update).delete(users::delete),
        )
        // Tasks
        .route("/api/v1/tasks", get(tasks::list).post(tasks::create))
        .route("/api/v1/tasks/deadline", get(tasks::deadline))
        .route(
            "/api/v1/tasks/{id}",
            get(tasks::get).put(tasks::update).delete(tasks::delete),
        )
        // Projects
        .route(
            "/api/v1/projects",
            get(projects::list).post(projects::create),
        )
        .route(
            "/api/v1/projects/{id}",
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete),
        )
        // Languages
        .route(
            "/api/v1/languages",
            get(languages::list).post(languages::create),
        )
        .route(
            "/api/v1/languages/{id}",
            get(languages::get)
                .put(languages::update)
                .delete(languages::delete),
        )
        // Task statuses
        .route(
            "/api/v1/task_statuses",
            get(task_statuses::list).post(task_statuses::create),
        )
        .route(
            "/api/v1/task_statuses/{id}",
            get(task_statuses::get)
                .put(task_statuses::update)
                .delete(task_statuses::delete),
        )
        // History
        .route(
            "/api/v1/history/{resource}/{id}",
            get(history::list_for_resource),
        )
}
