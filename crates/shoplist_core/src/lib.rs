//! Core logic for a local-first shopping-list app.
//! Storage, live list aggregation, validated use cases and screen state live here.

pub mod app;
pub mod config;
pub mod db;
pub mod live;
pub mod logging;
pub mod model;
pub mod presentation;
pub mod repo;
pub mod store;
pub mod usecase;

pub use app::{AppError, ShoppingApp};
pub use config::{AppConfig, ConfigError};
pub use db::{Database, DbError};
pub use live::LiveQuery;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::shopping::{EntityId, Item, ShoppingList, UNSAVED_ID};
pub use repo::{RepoError, RepoResult, ShoppingItemRepository, ShoppingListRepository};
pub use usecase::{UseCaseError, UseCaseResult};

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
