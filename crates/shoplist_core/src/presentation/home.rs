//! State holder for the screen listing every shopping list.

use crate::live::{AbortOnDrop, LiveQuery};
use crate::model::shopping::ShoppingList;
use crate::presentation::state::StateHolder;
use crate::usecase::{
    AddShoppingListUseCase, DeleteShoppingListUseCase, GetShoppingListsUseCase, UseCaseError,
};
use serde::Serialize;
use tokio::sync::{watch, Mutex};

/// Snapshot rendered by the lists screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingListsHomeUiState {
    pub shopping_lists: Vec<ShoppingList>,
    /// `true` until the first list snapshot (or error) arrives.
    pub is_loading: bool,
    /// Shown once by the UI, then cleared through `clear_error`.
    pub error_message: Option<String>,
    pub show_add_list_sheet: bool,
    pub new_list_name: String,
    pub show_delete_dialog: bool,
    pub list_to_delete: Option<ShoppingList>,
}

impl Default for ShoppingListsHomeUiState {
    fn default() -> Self {
        Self {
            shopping_lists: Vec::new(),
            is_loading: true,
            error_message: None,
            show_add_list_sheet: false,
            new_list_name: String::new(),
            show_delete_dialog: false,
            list_to_delete: None,
        }
    }
}

/// Owns the lists screen state and handles its intents.
///
/// Dropping the holder cancels the list subscription.
pub struct ShoppingListsHomeStateHolder {
    state: StateHolder<ShoppingListsHomeUiState>,
    add_shopping_list: AddShoppingListUseCase,
    delete_shopping_list: DeleteShoppingListUseCase,
    intents: Mutex<()>,
    _loader: AbortOnDrop,
}

impl ShoppingListsHomeStateHolder {
    /// Builds the holder and starts collecting lists on the current runtime.
    pub fn new(
        get_shopping_lists: GetShoppingListsUseCase,
        add_shopping_list: AddShoppingListUseCase,
        delete_shopping_list: DeleteShoppingListUseCase,
    ) -> Self {
        let state = StateHolder::new(ShoppingListsHomeUiState::default());
        let loader = spawn_loader(state.clone(), get_shopping_lists.execute());
        Self {
            state,
            add_shopping_list,
            delete_shopping_list,
            intents: Mutex::new(()),
            _loader: loader,
        }
    }

    pub fn snapshot(&self) -> ShoppingListsHomeUiState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ShoppingListsHomeUiState> {
        self.state.subscribe()
    }

    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&ShoppingListsHomeUiState) -> bool,
    ) -> ShoppingListsHomeUiState {
        self.state.wait_for(predicate).await
    }

    pub async fn add_shopping_list(&self, name: &str) {
        let _turn = self.intents.lock().await;
        let result = self.add_shopping_list.execute(name).await;
        self.state.handle_result(
            result,
            |state, _| {
                state.show_add_list_sheet = false;
                state.new_list_name.clear();
            },
            |state, message| state.error_message = Some(message),
        );
    }

    pub async fn delete_shopping_list(&self, list: &ShoppingList) {
        let _turn = self.intents.lock().await;
        let result = self.delete_shopping_list.execute(list).await;
        self.state.handle_result(
            result,
            |state, _| {
                state.show_delete_dialog = false;
                state.list_to_delete = None;
            },
            |state, message| state.error_message = Some(message),
        );
    }

    pub fn clear_error(&self) {
        self.state.update(|state| state.error_message = None);
    }

    pub fn show_add_list_sheet(&self) {
        self.state.update(|state| state.show_add_list_sheet = true);
    }

    /// Hides the sheet and discards the typed name.
    pub fn hide_add_list_sheet(&self) {
        self.state.update(|state| {
            state.show_add_list_sheet = false;
            state.new_list_name.clear();
        });
    }

    pub fn update_new_list_name(&self, name: &str) {
        self.state
            .update(|state| state.new_list_name = name.to_string());
    }

    pub fn show_delete_confirmation(&self, list: &ShoppingList) {
        self.state.update(|state| {
            state.show_delete_dialog = true;
            state.list_to_delete = Some(list.clone());
        });
    }

    pub fn hide_delete_confirmation(&self) {
        self.state.update(|state| {
            state.show_delete_dialog = false;
            state.list_to_delete = None;
        });
    }
}

fn spawn_loader(
    state: StateHolder<ShoppingListsHomeUiState>,
    mut lists: LiveQuery<Vec<ShoppingList>>,
) -> AbortOnDrop {
    AbortOnDrop::spawn(async move {
        while let Some(next) = lists.next().await {
            match next {
                Ok(shopping_lists) => state.update(|state| {
                    state.shopping_lists = shopping_lists;
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
