//! Per-screen state holders.
//!
//! # Responsibility
//! - Hold one immutable UI snapshot per screen.
//! - Turn user intents into use-case calls and fold outcomes into state.
//!
//! # Invariants
//! - Intents of one holder run one at a time.
//! - Holders must be created inside a tokio runtime; dropping one cancels
//!   its read subscription.

pub mod home;
pub mod list_items;
pub mod state;

pub use home::{ShoppingListsHomeStateHolder, ShoppingListsHomeUiState};
pub use list_items::{ListItemsUseCases, ShoppingListItemsStateHolder, ShoppingListItemsUiState};
pub use state::StateHolder;
