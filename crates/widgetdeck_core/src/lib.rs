//! Core domain logic for the WidgetDeck dashboard.
//! This crate is the single source of truth for dashboard state invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::dashboard::{
    Category, DashboardState, StateValidationError, Widget, UNTITLED_WIDGET_NAME,
};
pub use model::ids::{CategoryId, IdError, WidgetId};
pub use repo::snapshot_repo::{
    MemorySnapshotRepository, RepoError, RepoResult, SnapshotRepository,
    SqliteSnapshotRepository, SNAPSHOT_KEY,
};
pub use seed::seed_state;
pub use service::dashboard_service::DashboardService;
pub use store::{reduce, Intent, NoopReason, Outcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
