//! State holder for the screen showing one list and its items.

use crate::live::{AbortOnDrop, LiveQuery};
use crate::model::shopping::{EntityId, Item, ShoppingList};
use crate::presentation::state::StateHolder;
use crate::usecase::{
    AddItemToListUseCase, DeleteItemUseCase, GetShoppingListByIdUseCase,
    ToggleItemCompletedUseCase, UseCaseError,
};
use log::warn;
use serde::Serialize;
use tokio::sync::{watch, Mutex};

/// Snapshot rendered by the list detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingListItemsUiState {
    /// `None` while loading or when the list does not exist.
    pub shopping_list: Option<ShoppingList>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub show_add_item_sheet: bool,
    pub new_item_name: String,
}

impl Default for ShoppingListItemsUiState {
    fn default() -> Self {
        Self {
            shopping_list: None,
            is_loading: true,
            error_message: None,
            show_add_item_sheet: false,
            new_item_name: String::new(),
        }
    }
}

/// Use cases needed by the list detail screen.
pub struct ListItemsUseCases {
    pub get_shopping_list: GetShoppingListByIdUseCase,
    pub add_item: AddItemToListUseCase,
    pub toggle_item: ToggleItemCompletedUseCase,
    pub delete_item: DeleteItemUseCase,
}

/// Owns the detail screen state for one list id.
pub struct ShoppingListItemsStateHolder {
    list_id: EntityId,
    state: StateHolder<ShoppingListItemsUiState>,
    add_item: AddItemToListUseCase,
    toggle_item: ToggleItemCompletedUseCase,
    delete_item: DeleteItemUseCase,
    intents: Mutex<()>,
    _loader: Option<AbortOnDrop>,
}

impl ShoppingListItemsStateHolder {
    /// Builds the holder for `list_id` and starts observing that list.
    ///
    /// An invalid id does not subscribe; the validation message lands in
    /// `error_message` instead.
    pub fn new(list_id: EntityId, use_cases: ListItemsUseCases) -> Self {
        let state = StateHolder::new(ShoppingListItemsUiState::default());
        let loader = match use_cases.get_shopping_list.execute(list_id) {
            Ok(list) => Some(spawn_loader(state.clone(), list)),
            Err(err) => {
                warn!("event=list_items_load module=presentation status=rejected list_id={list_id}");
                state.update(|state| {
                    state.is_loading = false;
                    state.error_message = Some(err.display_message().to_string());
                });
                None
            }
        };

        Self {
            list_id,
            state,
            add_item: use_cases.add_item,
            toggle_item: use_cases.toggle_item,
            delete_item: use_cases.delete_item,
            intents: Mutex::new(()),
            _loader: loader,
        }
    }

    pub fn list_id(&self) -> EntityId {
        self.list_id
    }

    pub fn snapshot(&self) -> ShoppingListItemsUiState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ShoppingListItemsUiState> {
        self.state.subscribe()
    }

    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&ShoppingListItemsUiState) -> bool,
    ) -> ShoppingListItemsUiState {
        self.state.wait_for(predicate).await
    }

    pub async fn add_item(&self, name: &str) {
        let _turn = self.intents.lock().await;
        let result = self.add_item.execute(self.list_id, name).await;
        self.state.handle_result(
            result,
            |state, _| {
                state.show_add_item_sheet = false;
                state.new_item_name.clear();
            },
            |state, message| state.error_message = Some(message),
        );
    }

    pub async fn toggle_item_completed(&self, item: &Item) {
        let _turn = self.intents.lock().await;
        let result = self.toggle_item.execute(item).await;
        self.state
            .handle_result(result, |_, _| {}, |state, message| {
                state.error_message = Some(message)
            });
    }

    pub async fn delete_item(&self, item: &Item) {
        let _turn = self.intents.lock().await;
        let result = self.delete_item.execute(item).await;
        self.state
            .handle_result(result, |_, _| {}, |state, message| {
                state.error_message = Some(message)
            });
    }

    pub fn clear_error(&self) {
        self.state.update(|state| state.error_message = None);
    }

    pub fn show_add_item_sheet(&self) {
        self.state.update(|state| state.show_add_item_sheet = true);
    }

    pub fn hide_add_item_sheet(&self) {
        self.state.update(|state| {
            state.show_add_item_sheet = false;
            state.new_item_name.clear();
        });
    }

    pub fn update_new_item_name(&self, name: &str) {
        self.state
            .update(|state| state.new_item_name = name.to_string());
    }
}

fn spawn_loader(
    state: StateHolder<ShoppingListItemsUiState>,
    mut list: LiveQuery<Option<ShoppingList>>,
) -> AbortOnDrop {
    AbortOnDrop::spawn(async move {
        while let Some(next) = list.next().await {
            match next {
                Ok(shopping_list) => state.update(|state| {
                    state.shopping_list = shopping_list;
                    state.is_loading = false;
                }),
                Err(err) => {
                    let message = UseCaseError::from(err).display_message().to_string();
                    state.update(|state| {
                        state.is_loading = false;
                        state.error_message = Some(message);
                    });
                    return;
                }
            }
        }
    })
}
