//! Local persistence boundary.
//!
//! # Responsibility
//! - Row shapes for the two tables (`entity`).
//! - SQL for every read/write (`dao`).
//! - Row <-> domain conversion (`mapper`).
//! - The async data-source contract used by repositories (`local_source`).
//!
//! # Invariants
//! - SQL never leaves this module.
//! - Writes invalidate exactly the tables they can change.

pub mod dao;
pub mod entity;
pub mod local_source;
pub mod mapper;

pub use entity::{ItemEntity, ShoppingListEntity};
pub use local_source::{LocalDataSource, SqliteLocalDataSource};
