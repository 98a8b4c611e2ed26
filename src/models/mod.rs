mod client;
mod history_entry;
mod language;
mod project;
mod stamps;
mod task;
mod task_status;
mod user;

pub use client::Client;
pub use history_entry::HistoryEntry;
pub use language::Language;
pub use project::Project;
pub use stamps::{Blame, Stamps};
pub use task::Task;
pub use task_status::TaskStatus;
pub use user::User;
