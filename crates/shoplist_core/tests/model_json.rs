use serde_json::json;
use shoplist_core::{Item, ShoppingList};

#[test]
fn shopping_list_serializes_with_nested_items() {
    let list = ShoppingList {
        id: 1,
        name: "Groceries".to_string(),
        items: vec![Item {
            id: 5,
            list_id: 1,
            name: "Milk".to_string(),
            is_checked: true,
        }],
    };

    let value = serde_json::to_value(&list).unwrap();
    assert_eq!(
        value,
        json!({
            "id": 1,
            "name": "Groceries",
            "items": [{ "id": 5, "list_id": 1, "name": "Milk", "is_checked": true }]
        })
    );

    let parsed: ShoppingList = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, list);
    assert_eq!(parsed.checked_count(), 1);
}

#[test]
fn new_records_start_unsaved_and_unchecked() {
    let item = Item::new(3, "Bread");
    assert_eq!(item.id, shoplist_core::UNSAVED_ID);
    assert!(!item.is_checked);
    assert!(ShoppingList::new("Hardware").items.is_empty());
}
