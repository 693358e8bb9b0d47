//! Use cases operating on whole shopping lists.
//!
//! # Invariants
//! - Names are trimmed before persistence; blank names are rejected.
//! - Non-positive ids are rejected before any repository call.

use crate::live::LiveQuery;
use crate::model::shopping::{EntityId, ShoppingList};
use crate::repo::ShoppingListRepository;
use crate::usecase::{log_outcome, UseCaseError, UseCaseResult};
use std::sync::Arc;

/// Creates a new, empty shopping list.
pub struct AddShoppingListUseCase<R: ?Sized = dyn ShoppingListRepository> {
    repo: Arc<R>,
}

impl<R: ShoppingListRepository + ?Sized> AddShoppingListUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Persists a list named `name.trim()` and returns its id.
    ///
    /// # Errors
    /// - `Validation` when `name` is empty or whitespace only.
    /// - `Unknown` when the store rejects the write.
    pub async fn execute(&self, name: &str) -> UseCaseResult<EntityId> {
        let result = match name.trim() {
            "" => Err(UseCaseError::Validation(
                "Shopping list name cannot be empty".to_string(),
            )),
            trimmed => self
                .repo
                .add_shopping_list(trimmed)
                .await
                .map_err(UseCaseError::from),
        };
        log_outcome("list_add", &result);
        result
    }
}

/// Deletes a list; its items go with it.
pub struct DeleteShoppingListUseCase<R: ?Sized = dyn ShoppingListRepository> {
    repo: Arc<R>,
}

impl<R: ShoppingListRepository + ?Sized> DeleteShoppingListUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, list: &ShoppingList) -> UseCaseResult<()> {
        let result = if list.id <= 0 {
            Err(UseCaseError::Validation(
                "Invalid shopping list ID".to_string(),
            ))
        } else {
            self.repo
                .delete_shopping_list(list)
                .await
                .map_err(UseCaseError::from)
        };
        log_outcome("list_delete", &result);
        result
    }
}

/// Live collection of every list with its items.
pub struct GetShoppingListsUseCase<R: ?Sized = dyn ShoppingListRepository> {
    repo: Arc<R>,
}

impl<R: ShoppingListRepository + ?Sized> GetShoppingListsUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub fn execute(&self) -> LiveQuery<Vec<ShoppingList>> {
        self.repo.shopping_lists()
    }
}

/// Live view of one list with its items.
pub struct GetShoppingListByIdUseCase<R: ?Sized = dyn ShoppingListRepository> {
    repo: Arc<R>,
}

impl<R: ShoppingListRepository + ?Sized> GetShoppingListByIdUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Subscribes to list `list_id`.
    ///
    /// The id is checked before subscribing: `list_id <= 0` fails right away
    /// and no subscription is created. A valid id that matches no row yields
    /// a stream emitting `None`.
    pub fn execute(&self, list_id: EntityId) -> UseCaseResult<LiveQuery<Option<ShoppingList>>> {
        if list_id <= 0 {
            let result = Err(UseCaseError::Validation(
                "Shopping list ID must be greater than 0".to_string(),
            ));
            log_outcome("list_get", &result);
            return result;
        }
        Ok(self.repo.shopping_list(list_id))
    }
}
