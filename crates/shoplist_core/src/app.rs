//! Composition root wiring storage, repositories, use cases and screens.
//!
//! # Responsibility
//! - Own the one `Database` handle the rest of the graph shares.
//! - Hand out use cases and state holders built over the same repositories.
//!
//! Screen constructors spawn tasks, so they must run inside a tokio runtime.

use crate::config::{AppConfig, ConfigError};
use crate::db::{Database, DbError};
use crate::logging;
use crate::model::shopping::EntityId;
use crate::presentation::{
    ListItemsUseCases, ShoppingListItemsStateHolder, ShoppingListsHomeStateHolder,
};
use crate::repo::{
    LocalShoppingItemRepository, LocalShoppingListRepository, ShoppingItemRepository,
    ShoppingListRepository,
};
use crate::store::{LocalDataSource, SqliteLocalDataSource};
use crate::usecase::{
    AddItemToListUseCase, AddShoppingListUseCase, DeleteItemUseCase, DeleteShoppingListUseCase,
    GetShoppingListByIdUseCase, GetShoppingListsUseCase, ToggleItemCompletedUseCase,
};
use log::info;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Startup failure.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Logging(String),
    Db(DbError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "logging init failed: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(_) => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        Self::Db(err)
    }
}

/// Fully wired shopping-list core.
#[derive(Clone)]
pub struct ShoppingApp {
    database: Database,
    lists: Arc<dyn ShoppingListRepository>,
    items: Arc<dyn ShoppingItemRepository>,
}

impl ShoppingApp {
    /// Validates `config`, starts file logging when `log_dir` is set, then
    /// opens the database at `db_path`.
    pub fn open(config: &AppConfig) -> Result<Self, AppError> {
        config.validate()?;
        if let Some(log_dir) = &config.log_dir {
            logging::init_logging(&config.log_level, log_dir).map_err(AppError::Logging)?;
        }
        let database = Database::open(&config.db_path)?;
        info!("event=app_open module=app status=ok");
        Ok(Self::from_database(database))
    }

    /// Private in-memory store, mainly for tests and previews.
    pub fn in_memory() -> Result<Self, AppError> {
        Ok(Self::from_database(Database::open_in_memory()?))
    }

    pub fn from_database(database: Database) -> Self {
        let source: Arc<dyn LocalDataSource> =
            Arc::new(SqliteLocalDataSource::new(database.clone()));
        let lists: Arc<dyn ShoppingListRepository> =
            Arc::new(LocalShoppingListRepository::new(Arc::clone(&source)));
        let items: Arc<dyn ShoppingItemRepository> =
            Arc::new(LocalShoppingItemRepository::new(source));
        Self {
            database,
            lists,
            items,
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn list_repository(&self) -> Arc<dyn ShoppingListRepository> {
        Arc::clone(&self.lists)
    }

    pub fn item_repository(&self) -> Arc<dyn ShoppingItemRepository> {
        Arc::clone(&self.items)
    }

    pub fn add_shopping_list(&self) -> AddShoppingListUseCase {
        AddShoppingListUseCase::new(self.list_repository())
    }

    pub fn delete_shopping_list(&self) -> DeleteShoppingListUseCase {
        DeleteShoppingListUseCase::new(self.list_repository())
    }

    pub fn get_shopping_lists(&self) -> GetShoppingListsUseCase {
        GetShoppingListsUseCase::new(self.list_repository())
    }

    pub fn get_shopping_list_by_id(&self) -> GetShoppingListByIdUseCase {
        GetShoppingListByIdUseCase::new(self.list_repository())
    }

    pub fn add_item_to_list(&self) -> AddItemToListUseCase {
        AddItemToListUseCase::new(self.item_repository())
    }

    pub fn toggle_item_completed(&self) -> ToggleItemCompletedUseCase {
        ToggleItemCompletedUseCase::new(self.item_repository())
    }

    pub fn delete_item(&self) -> DeleteItemUseCase {
        DeleteItemUseCase::new(self.item_repository())
    }

    /// State holder for the lists overview.
    pub fn home_screen(&self) -> ShoppingListsHomeStateHolder {
        ShoppingListsHomeStateHolder::new(
            self.get_shopping_lists(),
            self.add_shopping_list(),
            self.delete_shopping_list(),
        )
    }

    /// State holder for the detail screen of `list_id`.
    pub fn list_items_screen(&self, list_id: EntityId) -> ShoppingListItemsStateHolder {
        ShoppingListItemsStateHolder::new(
            list_id,
            ListItemsUseCases {
                get_shopping_list: self.get_shopping_list_by_id(),
                add_item: self.add_item_to_list(),
                toggle_item: self.toggle_item_completed(),
                delete_item: self.delete_item(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, ShoppingApp};
    use crate::config::AppConfig;
    use std::path::PathBuf;

    #[tokio::test]
    async fn open_creates_database_file_and_shares_it() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            db_path: dir.path().join("lists.sqlite3"),
            ..AppConfig::default()
        };

        let app = ShoppingApp::open(&config).unwrap();
        let id = app.add_shopping_list().execute("Groceries").await.unwrap();
        drop(app);

        let reopened = ShoppingApp::open(&config).unwrap();
        let mut list = reopened.get_shopping_list_by_id().execute(id).unwrap();
        let found = list.next().await.unwrap().unwrap().unwrap();
        assert_eq!(found.name, "Groceries");
    }

    #[test]
    fn open_rejects_invalid_config_before_touching_disk() {
        let config = AppConfig {
            db_path: PathBuf::new(),
            ..AppConfig::default()
        };
        assert!(matches!(
            ShoppingApp::open(&config),
            Err(AppError::Config(_))
        ));
    }
}
