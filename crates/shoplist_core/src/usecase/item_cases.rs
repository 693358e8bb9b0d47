//! Use cases operating on single items.

use crate::model::shopping::{EntityId, Item};
use crate::repo::ShoppingItemRepository;
use crate::usecase::{log_outcome, UseCaseError, UseCaseResult};
use std::sync::Arc;

fn invalid_item_id() -> UseCaseError {
    UseCaseError::Validation("Invalid item ID".to_string())
}

/// Adds an unchecked item to an existing list.
pub struct AddItemToListUseCase<R: ?Sized = dyn ShoppingItemRepository> {
    repo: Arc<R>,
}

impl<R: ShoppingItemRepository + ?Sized> AddItemToListUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Persists `name.trim()` under `list_id` and returns the new item id.
    ///
    /// # Errors
    /// - `Validation` when `list_id <= 0` (checked first) or `name` is blank.
    /// - `Unknown` when the store rejects the write, e.g. `list_id` names no list.
    pub async fn execute(&self, list_id: EntityId, name: &str) -> UseCaseResult<EntityId> {
        let trimmed = name.trim();
        let result = if list_id <= 0 {
            Err(UseCaseError::Validation(
                "Shopping list ID must be greater than 0".to_string(),
            ))
        } else if trimmed.is_empty() {
            Err(UseCaseError::Validation(
                "Item name cannot be empty".to_string(),
            ))
        } else {
            self.repo
                .add_item(list_id, trimmed)
                .await
                .map_err(UseCaseError::from)
        };
        log_outcome("item_add", &result);
        result
    }
}

/// Flips the checked flag of an item.
pub struct ToggleItemCompletedUseCase<R: ?Sized = dyn ShoppingItemRepository> {
    repo: Arc<R>,
}

impl<R: ShoppingItemRepository + ?Sized> ToggleItemCompletedUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Writes `item` back with `is_checked` inverted.
    ///
    /// The caller's snapshot is the source of the new value, so two toggles
    /// issued from the same stale snapshot write the same flag twice.
    pub async fn execute(&self, item: &Item) -> UseCaseResult<()> {
        let result = if item.id <= 0 {
            Err(invalid_item_id())
        } else {
            self.repo
                .update_item(&item.toggled())
                .await
                .map_err(UseCaseError::from)
        };
        log_outcome("item_toggle", &result);
        result
    }
}

/// Removes one item.
pub struct DeleteItemUseCase<R: ?Sized = dyn ShoppingItemRepository> {
    repo: Arc<R>,
}

impl<R: ShoppingItemRepository + ?Sized> DeleteItemUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, item: &Item) -> UseCaseResult<()> {
        let result = if item.id <= 0 {
            Err(invalid_item_id())
        } else {
            self.repo
                .delete_item(item)
                .await
                .map_err(UseCaseError::from)
        };
        log_outcome("item_delete", &result);
        result
    }
}
