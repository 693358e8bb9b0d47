//! Table-level change notification.
//!
//! # Responsibility
//! - Keep one monotonically increasing version per observed table.
//! - Let live queries wait for "something in this table changed".
//!
//! # Invariants
//! - Versions are bumped only after a write has committed.
//! - A list delete bumps `items` too, because rows vanish through the cascade.

use log::debug;
use tokio::sync::watch;

/// Tables that live queries can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    ShoppingLists,
    Items,
}

impl Table {
    /// SQL table name.
    pub fn name(self) -> &'static str {
        match self {
            Self::ShoppingLists => "shopping_lists",
            Self::Items => "items",
        }
    }
}

/// Per-table version counters backed by `watch` channels.
#[derive(Debug)]
pub struct InvalidationTracker {
    shopping_lists: watch::Sender<u64>,
    items: watch::Sender<u64>,
}

impl Default for InvalidationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InvalidationTracker {
    pub fn new() -> Self {
        let (shopping_lists, _) = watch::channel(0);
        let (items, _) = watch::channel(0);
        Self {
            shopping_lists,
            items,
        }
    }

    /// Returns a receiver that wakes whenever `table` is invalidated.
    pub fn subscribe(&self, table: Table) -> watch::Receiver<u64> {
        self.sender(table).subscribe()
    }

    /// Current version of `table`.
    pub fn version(&self, table: Table) -> u64 {
        *self.sender(table).borrow()
    }

    /// Number of live receivers currently watching `table`.
    pub fn observer_count(&self, table: Table) -> usize {
        self.sender(table).receiver_count()
    }

    /// Marks every table in `tables` as changed.
    pub fn notify(&self, tables: &[Table]) {
        for table in tables {
            self.sender(*table)
                .send_modify(|version| *version = version.wrapping_add(1));
            debug!(
                "event=table_invalidated module=db table={} version={} observers={}",
                table.name(),
                self.version(*table),
                self.observer_count(*table)
            );
        }
    }

    fn sender(&self, table: Table) -> &watch::Sender<u64> {
        match table {
            Table::ShoppingLists => &self.shopping_lists,
            Table::Items => &self.items,
        }
    }
}
