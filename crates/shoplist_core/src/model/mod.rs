//! Domain model for shopping lists and their items.
//!
//! # Responsibility
//! - Define the records the use cases and state holders work with.
//! - Stay independent from storage row shapes (see `store::mapper`).
//!
//! # Invariants
//! - Identifiers are store-assigned; `0` means "not persisted yet".
//! - An `Item` always belongs to exactly one list via `list_id`.

pub mod shopping;
