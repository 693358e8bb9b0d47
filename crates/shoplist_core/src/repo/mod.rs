//! Repository contracts and their data-source backed implementations.
//!
//! # Responsibility
//! - Expose reactive reads and mutations in domain terms.
//! - Join lists with their items (`list_repo`).
//!
//! # Invariants
//! - Repositories do not validate input; use cases do.
//! - Store failures are returned as `RepoError`, never swallowed.

pub mod error;
pub mod item_repo;
pub mod list_repo;

pub use error::{RepoError, RepoResult};
pub use item_repo::{LocalShoppingItemRepository, ShoppingItemRepository};
pub use list_repo::{LocalShoppingListRepository, ShoppingListRepository};
