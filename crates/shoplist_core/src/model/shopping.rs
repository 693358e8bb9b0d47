//! Shopping list and item records.
//!
//! # Invariants
//! - Persisted records carry a positive `id`.
//! - `ShoppingList::items` is ordered by item id ascending.

use serde::{Deserialize, Serialize};

/// Store-assigned row identifier shared by lists and items.
pub type EntityId = i64;

/// Identifier value used for records that have not been written yet.
pub const UNSAVED_ID: EntityId = 0;

/// A single shopping entry belonging to one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    /// Owning list; must reference an existing `ShoppingList`.
    pub list_id: EntityId,
    pub name: String,
    pub is_checked: bool,
}

impl Item {
    /// Creates an unsaved, unchecked item for `list_id`.
    pub fn new(list_id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            list_id,
            name: name.into(),
            is_checked: false,
        }
    }

    /// Returns a copy with the checked flag inverted.
    pub fn toggled(&self) -> Self {
        Self {
            is_checked: !self.is_checked,
            ..self.clone()
        }
    }
}

/// A named list populated with its current items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: EntityId,
    pub name: String,
    pub items: Vec<Item>,
}

impl ShoppingList {
    /// Creates an unsaved list with no items.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Number of items already checked off.
    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_checked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::{Item, ShoppingList, UNSAVED_ID};

    #[test]
    fn toggled_flips_only_the_checked_flag() {
        let item = Item {
            id: 3,
            list_id: 1,
            name: "Milk".to_string(),
            is_checked: false,
        };

        let toggled = item.toggled();
        assert!(toggled.is_checked);
        assert_eq!(toggled.id, 3);
        assert_eq!(toggled.name, "Milk");
        assert!(!toggled.toggled().is_checked);
    }

    #[test]
    fn new_records_are_unsaved() {
        assert_eq!(Item::new(2, "Eggs").id, UNSAVED_ID);
        let list = ShoppingList::new("Groceries");
        assert_eq!(list.id, UNSAVED_ID);
        assert_eq!(list.checked_count(), 0);
    }
}
