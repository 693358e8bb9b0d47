//! Pure conversions between storage rows and domain records.

use crate::model::shopping::{Item, ShoppingList};
use crate::store::entity::{ItemEntity, ShoppingListEntity};

pub fn to_item_model(entity: ItemEntity) -> Item {
    Item {
        id: entity.id,
        list_id: entity.list_id,
        name: entity.name,
        is_checked: entity.is_checked,
    }
}

pub fn to_item_entity(item: &Item) -> ItemEntity {
    ItemEntity {
        id: item.id,
        list_id: item.list_id,
        name: item.name.clone(),
        is_checked: item.is_checked,
    }
}

/// Builds a domain list from its row and an already loaded item set.
pub fn to_shopping_list_model(entity: ShoppingListEntity, items: Vec<Item>) -> ShoppingList {
    ShoppingList {
        id: entity.id,
        name: entity.name,
        items,
    }
}

/// Drops `items`; they are persisted through their own table.
pub fn to_shopping_list_entity(list: &ShoppingList) -> ShoppingListEntity {
    ShoppingListEntity {
        id: list.id,
        name: list.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{to_item_entity, to_item_model, to_shopping_list_entity, to_shopping_list_model};
    use crate::model::shopping::{Item, ShoppingList};
    use crate::store::entity::ShoppingListEntity;

    #[test]
    fn item_fields_survive_both_directions() {
        let item = Item {
            id: 7,
            list_id: 2,
            name: "Bread".to_string(),
            is_checked: true,
        };
        assert_eq!(to_item_model(to_item_entity(&item)), item);
    }

    #[test]
    fn list_entity_ignores_items() {
        let mut list = ShoppingList::new("Groceries");
        list.items.push(Item::new(1, "Milk"));

        let entity = to_shopping_list_entity(&list);
        assert_eq!(entity.name, "Groceries");

        let rebuilt = to_shopping_list_model(
            ShoppingListEntity {
                id: 1,
                name: entity.name,
            },
            Vec::new(),
        );
        assert!(rebuilt.items.is_empty());
        assert_eq!(rebuilt.id, 1);
    }
}
