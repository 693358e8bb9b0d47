//! Single-purpose use cases bridging presentation intents to repositories.
//!
//! # Responsibility
//! - Validate input before any repository call.
//! - Convert every lower-level failure into a display-ready `UseCaseError`.
//!
//! # Invariants
//! - A rejected input never reaches the store (no partial writes).
//! - Presentation code never sees `RepoError` directly.

use crate::repo::RepoError;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod item_cases;
pub mod list_cases;

pub use item_cases::{AddItemToListUseCase, DeleteItemUseCase, ToggleItemCompletedUseCase};
pub use list_cases::{
    AddShoppingListUseCase, DeleteShoppingListUseCase, GetShoppingListByIdUseCase,
    GetShoppingListsUseCase,
};

const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

pub type UseCaseResult<T> = Result<T, UseCaseError>;

/// Failure surfaced at the use-case boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseCaseError {
    /// Rejected input; nothing was written.
    Validation(String),
    /// Anything else, e.g. an unexpected store failure.
    Unknown(String),
}

impl UseCaseError {
    /// Message meant for the user.
    pub fn display_message(&self) -> &str {
        match self {
            Self::Validation(message) | Self::Unknown(message) => message,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Short code for log lines.
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl Display for UseCaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_message())
    }
}

impl Error for UseCaseError {}

impl From<RepoError> for UseCaseError {
    fn from(value: RepoError) -> Self {
        let message = value.to_string();
        if message.trim().is_empty() {
            Self::Unknown(UNKNOWN_ERROR_MESSAGE.to_string())
        } else {
            Self::Unknown(message)
        }
    }
}

/// Logs the outcome of one use-case call with metadata only.
pub(crate) fn log_outcome<T>(event: &'static str, result: &UseCaseResult<T>) {
    match result {
        Ok(_) => info!("event={event} module=usecase status=ok"),
        Err(err @ UseCaseError::Validation(_)) => {
            warn!(
                "event={event} module=usecase status=rejected error_code={}",
                err.code()
            )
        }
        Err(err) => error!(
            "event={event} module=usecase status=error error_code={} error={err}",
            err.code()
        ),
    }
}
