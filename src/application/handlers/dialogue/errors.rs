//! Errors that abort a dialogue turn.
//!
//! Only failures the dialogue cannot answer around end up here. Extractor,
//! image lookup and booking-commit failures are logged and absorbed by the
//! controller instead.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::InventoryError;

/// Errors that can occur while advancing a conversation.
#[derive(Debug, Clone, Error)]
pub enum DialogueError {
    /// The inventory could not answer a query the next prompt depends on.
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    /// A step handler attempted a transition the step graph forbids.
    #[error("Invalid step transition: {0}")]
    InvalidTransition(#[from] ValidationError),
}

impl From<DialogueError> for DomainError {
    fn from(err: DialogueError) -> Self {
        let code = match &err {
            DialogueError::Inventory(InventoryError::Unavailable(_)) => {
                ErrorCode::InventoryUnavailable
            }
            DialogueError::Inventory(InventoryError::QueryFailed(_)) => {
                ErrorCode::InventoryQueryFailed
            }
            DialogueError::Inventory(InventoryError::Timeout) => ErrorCode::Timeout,
            DialogueError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_outage_is_retryable() {
        let outage: DomainError =
            DialogueError::from(InventoryError::Unavailable("pool closed".into())).into();
        assert_eq!(outage.code, ErrorCode::InventoryUnavailable);
        assert!(outage.code.is_retryable());
    }

    #[test]
    fn broken_query_is_not_retryable() {
        let err: DomainError = DialogueError::from(InventoryError::QueryFailed("syntax".into())).into();
        assert_eq!(err.code, ErrorCode::InventoryQueryFailed);
        assert!(!err.code.is_retryable());
    }

    #[test]
    fn converts_to_domain_error_codes() {
        let timeout: DomainError = DialogueError::from(InventoryError::Timeout).into();
        assert_eq!(timeout.code, ErrorCode::Timeout);

        let transition: DomainError =
            DialogueError::from(ValidationError::invalid_format("state_transition", "x")).into();
        assert_eq!(transition.code, ErrorCode::InvalidStateTransition);
    }
}
