mod common;

use common::{first, next_matching, wait_until};
use shoplist_core::db::Table;
use shoplist_core::{ShoppingApp, ShoppingItemRepository, ShoppingList};
use std::time::Duration;

fn names(lists: &[ShoppingList]) -> Vec<String> {
    lists.iter().map(|list| list.name.clone()).collect()
}

#[tokio::test]
async fn all_lists_stream_follows_list_and_item_writes() {
    let app = ShoppingApp::in_memory().unwrap();
    let mut lists = app.get_shopping_lists().execute();
    assert!(first(&mut lists).await.is_empty());

    let hardware = app.add_shopping_list().execute("Hardware").await.unwrap();
    let groceries = app.add_shopping_list().execute("Groceries").await.unwrap();
    let snapshot = next_matching(&mut lists, |lists| lists.len() == 2).await;
    assert_eq!(names(&snapshot), vec!["Groceries", "Hardware"]);

    let item_id = app
        .add_item_to_list()
        .execute(hardware, "Nails")
        .await
        .unwrap();
    let snapshot = next_matching(&mut lists, |lists| {
        lists.iter().any(|list| !list.items.is_empty())
    })
    .await;
    assert_eq!(snapshot[1].id, hardware);
    assert_eq!(snapshot[1].items[0].id, item_id);
    assert!(snapshot[0].items.is_empty());

    let to_delete = snapshot[1].clone();
    app.delete_shopping_list().execute(&to_delete).await.unwrap();
    let snapshot = next_matching(&mut lists, |lists| lists.len() == 1).await;
    assert_eq!(snapshot[0].id, groceries);
}

#[tokio::test]
async fn single_list_stream_tracks_items_and_deletion() {
    let app = ShoppingApp::in_memory().unwrap();
    let list_id = app.add_shopping_list().execute("Groceries").await.unwrap();
    let mut list = app.get_shopping_list_by_id().execute(list_id).unwrap();
    assert!(first(&mut list).await.unwrap().items.is_empty());

    app.add_item_to_list().execute(list_id, "Milk").await.unwrap();
    let current = next_matching(&mut list, |list| {
        list.as_ref().is_some_and(|list| list.items.len() == 1)
    })
    .await
    .unwrap();

    app.toggle_item_completed()
        .execute(&current.items[0])
        .await
        .unwrap();
    let toggled = next_matching(&mut list, |list| {
        list.as_ref().is_some_and(|list| list.checked_count() == 1)
    })
    .await
    .unwrap();
    assert_eq!(toggled.items[0].name, "Milk");

    app.delete_shopping_list().execute(&toggled).await.unwrap();
    next_matching(&mut list, Option::is_none).await;
}

#[tokio::test]
async fn item_writes_in_another_list_do_not_leak_into_observed_list() {
    let app = ShoppingApp::in_memory().unwrap();
    let groceries = app.add_shopping_list().execute("Groceries").await.unwrap();
    let hardware = app.add_shopping_list().execute("Hardware").await.unwrap();
    let mut list = app.get_shopping_list_by_id().execute(groceries).unwrap();
    first(&mut list).await;

    app.add_item_to_list().execute(hardware, "Nails").await.unwrap();
    app.add_item_to_list().execute(groceries, "Milk").await.unwrap();

    let current = next_matching(&mut list, |list| {
        list.as_ref().is_some_and(|list| !list.items.is_empty())
    })
    .await
    .unwrap();
    let item_names: Vec<&str> = current.items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(item_names, vec!["Milk"]);
}

#[tokio::test]
async fn independent_subscribers_see_the_same_state() {
    let app = ShoppingApp::in_memory().unwrap();
    let mut first_subscriber = app.get_shopping_lists().execute();
    let mut second_subscriber = app.get_shopping_lists().execute();

    app.add_shopping_list().execute("Groceries").await.unwrap();

    let a = next_matching(&mut first_subscriber, |lists| lists.len() == 1).await;
    let b = next_matching(&mut second_subscriber, |lists| lists.len() == 1).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn item_repository_streams_items_of_one_list() {
    let app = ShoppingApp::in_memory().unwrap();
    let list_id = app.add_shopping_list().execute("Groceries").await.unwrap();
    let mut items = app.item_repository().items_for_list(list_id);
    assert!(first(&mut items).await.is_empty());

    app.add_item_to_list().execute(list_id, "Milk").await.unwrap();
    let current = next_matching(&mut items, |items| items.len() == 1).await;
    assert_eq!(current[0].list_id, list_id);
    assert!(!current[0].is_checked);
}

async fn two_lists_with_one_item_each(app: &ShoppingApp) -> (i64, i64) {
    let first_list = app.add_shopping_list().execute("A").await.unwrap();
    let second_list = app.add_shopping_list().execute("B").await.unwrap();
    app.add_item_to_list().execute(first_list, "Milk").await.unwrap();
    app.add_item_to_list().execute(second_list, "Nails").await.unwrap();
    (first_list, second_list)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn deleting_a_list_never_emits_it_without_its_items() {
    for _ in 0..30 {
        let app = ShoppingApp::in_memory().unwrap();
        let (deleted, kept) = two_lists_with_one_item_each(&app).await;
        let mut lists = app.get_shopping_lists().execute();
        let snapshot = next_matching(&mut lists, |lists| {
            lists.len() == 2 && lists.iter().all(|list| list.items.len() == 1)
        })
        .await;

        let target = snapshot[0].clone();
        assert_eq!(target.id, deleted);
        app.delete_shopping_list().execute(&target).await.unwrap();

        let last = next_matching(&mut lists, |lists| {
            for list in lists {
                assert_eq!(
                    list.items.len(),
                    1,
                    "list {} emitted without its items",
                    list.id
                );
            }
            lists.len() == 1
        })
        .await;
        assert_eq!(last[0].id, kept);
    }
}

#[tokio::test]
async fn item_subscriptions_are_released_on_delete_and_drop() {
    let app = ShoppingApp::in_memory().unwrap();
    let (deleted, _) = two_lists_with_one_item_each(&app).await;
    let tracker = app.database().tracker();

    let mut lists = app.get_shopping_lists().execute();
    let snapshot = next_matching(&mut lists, |lists| lists.len() == 2).await;
    assert_eq!(tracker.observer_count(Table::Items), 2);
    assert_eq!(tracker.observer_count(Table::ShoppingLists), 1);

    let target = snapshot.into_iter().find(|list| list.id == deleted).unwrap();
    app.delete_shopping_list().execute(&target).await.unwrap();
    next_matching(&mut lists, |lists| lists.len() == 1).await;
    wait_until(|| tracker.observer_count(Table::Items) == 1).await;

    drop(lists);
    wait_until(|| {
        tracker.observer_count(Table::Items) == 0
            && tracker.observer_count(Table::ShoppingLists) == 0
    })
    .await;
}

#[tokio::test]
async fn item_write_in_one_list_yields_a_single_combined_emission() {
    let app = ShoppingApp::in_memory().unwrap();
    let (_, second_list) = two_lists_with_one_item_each(&app).await;
    let mut lists = app.get_shopping_lists().execute();
    next_matching(&mut lists, |lists| {
        lists.len() == 2 && lists.iter().all(|list| list.items.len() == 1)
    })
    .await;

    app.add_item_to_list()
        .execute(second_list, "Screws")
        .await
        .unwrap();
    let snapshot = first(&mut lists).await;
    assert_eq!(snapshot[1].items.len(), 2);
    assert_eq!(snapshot[0].items.len(), 1);

    let quiet = tokio::time::timeout(Duration::from_millis(200), lists.next()).await;
    assert!(quiet.is_err(), "unchanged list re-emitted after a foreign item write");
}
