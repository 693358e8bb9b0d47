//! Shared plumbing for per-screen state holders.
//!
//! # Invariants
//! - Readers only ever observe whole snapshots; updates are applied atomically.
//! - Error messages are stored as display text, never as lower-level errors.

use crate::usecase::UseCaseResult;
use std::sync::Arc;
use tokio::sync::watch;

/// Observable, immutable-snapshot state container.
#[derive(Debug)]
pub struct StateHolder<S> {
    state: Arc<watch::Sender<S>>,
}

impl<S> Clone for StateHolder<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: Clone> StateHolder<S> {
    pub fn new(initial: S) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state: Arc::new(state),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> S {
        self.state.borrow().clone()
    }

    /// Receiver that wakes on every state change.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }

    /// Waits until the state satisfies `predicate` and returns that snapshot.
    pub async fn wait_for(&self, predicate: impl FnMut(&S) -> bool) -> S {
        let mut rx = self.state.subscribe();
        let state = match rx.wait_for(predicate).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so the channel cannot close here.
            Err(_) => self.snapshot(),
        };
        state
    }

    /// Applies `change` and notifies subscribers.
    pub fn update(&self, change: impl FnOnce(&mut S)) {
        self.state.send_modify(change);
    }

    /// Folds a use-case outcome into state.
    pub fn handle_result<T>(
        &self,
        result: UseCaseResult<T>,
        on_success: impl FnOnce(&mut S, T),
        on_error: impl FnOnce(&mut S, String),
    ) {
        match result {
            Ok(value) => self.update(|state| on_success(state, value)),
            Err(err) => {
                let message = err.display_message().to_string();
                self.update(|state| on_error(state, message));
            }
        }
    }
}
