//! Async data-source contract over the local SQLite store.
//!
//! # Responsibility
//! - Expose live per-table observations as domain records.
//! - Run one-statement mutations under the store lock and publish invalidations.
//!
//! # Invariants
//! - Observed lists carry an empty `items` vector; joining is the repository's job.
//! - Deleting a list invalidates `items` as well (rows go away by cascade).

use crate::db::{Database, Table};
use crate::live::{self, LiveQuery};
use crate::model::shopping::{EntityId, Item, ShoppingList};
use crate::repo::RepoResult;
use crate::store::{dao, mapper};
use async_trait::async_trait;
use log::debug;

/// Persistence operations needed by the repositories.
#[async_trait]
pub trait LocalDataSource: Send + Sync {
    /// All lists ordered by name, without items.
    fn observe_shopping_lists(&self) -> LiveQuery<Vec<ShoppingList>>;
    /// One list without items, or `None` when absent.
    fn observe_shopping_list(&self, list_id: EntityId) -> LiveQuery<Option<ShoppingList>>;
    /// Items of one list ordered by id.
    ///
    /// Every item write re-runs the query of every observer; results equal
    /// to the previous emission are dropped (see `live::observe`).
    fn observe_items_for_list(&self, list_id: EntityId) -> LiveQuery<Vec<Item>>;
    /// Items of one list, or `None` once the list row itself is gone.
    ///
    /// The row check and the item query share one read, so a `Some` never
    /// carries items of a list that was deleted before the read.
    fn observe_list_items(&self, list_id: EntityId) -> LiveQuery<Option<Vec<Item>>>;
    /// Inserts a list and returns its id.
    async fn insert_shopping_list(&self, list: &ShoppingList) -> RepoResult<EntityId>;
    /// Inserts or replaces an item by id and returns its id.
    async fn insert_item(&self, item: &Item) -> RepoResult<EntityId>;
    async fn delete_item(&self, item: &Item) -> RepoResult<()>;
    /// Deletes a list together with its items.
    async fn delete_shopping_list(&self, list: &ShoppingList) -> RepoResult<()>;
}

/// `LocalDataSource` backed by the shared `Database` handle.
#[derive(Clone)]
pub struct SqliteLocalDataSource {
    db: Database,
}

impl SqliteLocalDataSource {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LocalDataSource for SqliteLocalDataSource {
    fn observe_shopping_lists(&self) -> LiveQuery<Vec<ShoppingList>> {
        live::observe(&self.db, Table::ShoppingLists, |conn| {
            let rows = dao::select_shopping_lists(conn)?;
            Ok(rows
                .into_iter()
                .map(|row| mapper::to_shopping_list_model(row, Vec::new()))
                .collect())
        })
    }

    fn observe_shopping_list(&self, list_id: EntityId) -> LiveQuery<Option<ShoppingList>> {
        live::observe(&self.db, Table::ShoppingLists, move |conn| {
            let row = dao::select_shopping_list_by_id(conn, list_id)?;
            Ok(row.map(|row| mapper::to_shopping_list_model(row, Vec::new())))
        })
    }

    fn observe_items_for_list(&self, list_id: EntityId) -> LiveQuery<Vec<Item>> {
        live::observe(&self.db, Table::Items, move |conn| {
            let rows = dao::select_items_for_list(conn, list_id)?;
            Ok(rows.into_iter().map(mapper::to_item_model).collect())
        })
    }

    fn observe_list_items(&self, list_id: EntityId) -> LiveQuery<Option<Vec<Item>>> {
        live::observe(&self.db, Table::Items, move |conn| {
            if dao::select_shopping_list_by_id(conn, list_id)?.is_none() {
                return Ok(None);
            }
            let rows = dao::select_items_for_list(conn, list_id)?;
            Ok(Some(rows.into_iter().map(mapper::to_item_model).collect()))
        })
    }

    async fn insert_shopping_list(&self, list: &ShoppingList) -> RepoResult<EntityId> {
        let entity = mapper::to_shopping_list_entity(list);
        self.db
            .write(&[Table::ShoppingLists], |conn| {
                dao::insert_shopping_list(conn, &entity)
            })
            .await
    }

    async fn insert_item(&self, item: &Item) -> RepoResult<EntityId> {
        let entity = mapper::to_item_entity(item);
        self.db
            .write(&[Table::Items], |conn| dao::upsert_item(conn, &entity))
            .await
    }

    async fn delete_item(&self, item: &Item) -> RepoResult<()> {
        let item_id = item.id;
        let removed = self
            .db
            .write(&[Table::Items], |conn| dao::delete_item_by_id(conn, item_id))
            .await?;
        debug!("event=item_delete module=store item_id={item_id} removed={removed}");
        Ok(())
    }

    async fn delete_shopping_list(&self, list: &ShoppingList) -> RepoResult<()> {
        let list_id = list.id;
        let removed = self
            .db
            .write(&[Table::ShoppingLists, Table::Items], |conn| {
                dao::delete_shopping_list_by_id(conn, list_id)
            })
            .await?;
        debug!("event=list_delete module=store list_id={list_id} removed={removed}");
        Ok(())
    }
}
