//! Storage row shapes for `shopping_lists` and `items`.

use crate::model::shopping::EntityId;

/// One row of `shopping_lists`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListEntity {
    /// `0` asks the store to assign an id on insert.
    pub id: EntityId,
    pub name: String,
}

/// One row of `items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntity {
    /// `0` asks the store to assign an id on insert.
    pub id: EntityId,
    /// Column `listId`.
    pub list_id: EntityId,
    pub name: String,
    /// Column `isChecked`, stored as 0/1.
    pub is_checked: bool,
}
