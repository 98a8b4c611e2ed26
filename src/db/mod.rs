pub mod clients;
pub mod history;
pub mod languages;
pub mod projects;
pub mod task_statuses;
pub mod tasks;
pub mod users;
