//! HTTP handlers for conversation endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::application::handlers::conversation::{HandleMessageCommand, HandleMessageHandler};
use crate::domain::foundation::{ConversationKey, DomainError, ErrorCode};

use super::dto::{ErrorResponse, HealthResponse, SendMessageRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Shared application state for conversation endpoints.
#[derive(Clone)]
pub struct ConversationAppState {
    pub handler: Arc<HandleMessageHandler>,
}

impl ConversationAppState {
    pub fn new(handler: Arc<HandleMessageHandler>) -> Self {
        Self { handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/conversations/:key/messages - Run one dialogue turn
pub async fn send_message(
    State(state): State<ConversationAppState>,
    Path(key): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Response {
    let key = match ConversationKey::new(key) {
        Ok(key) => key,
        Err(e) => return handle_domain_error(e.into()),
    };

    let cmd = HandleMessageCommand {
        key,
        message: req.message,
    };

    match state.handler.handle(cmd).await {
        Ok(result) => match result.response {
            Some(payload) => (StatusCode::OK, Json(payload)).into_response(),
            None => StatusCode::NO_CONTENT.into_response(),
        },
        Err(e) => handle_domain_error(e.into()),
    }
}

/// DELETE /api/conversations/:key - Forget a conversation
pub async fn reset_conversation(
    State(state): State<ConversationAppState>,
    Path(key): Path<String>,
) -> Response {
    let key = match ConversationKey::new(key) {
        Ok(key) => key,
        Err(e) => return handle_domain_error(e.into()),
    };

    match state.handler.reset(&key).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_domain_error(e.into()),
    }
}

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_domain_error(error: DomainError) -> Response {
    match error.code {
        ErrorCode::EmptyField | ErrorCode::InvalidFormat => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.message)),
        )
            .into_response(),
        code if code.is_retryable() => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(
                ErrorResponse::service_unavailable(error.message)
                    .with_details(serde_json::json!({ "retryable": true, "code": code.to_string() })),
            ),
        )
            .into_response(),
        _ => {
            error!(error = %error, "Conversation turn failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(error.message)),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::conversation::HandleMessageError;
    use crate::application::handlers::dialogue::DialogueError;
    use crate::domain::foundation::ValidationError;
    use crate::ports::{InventoryError, SessionStoreError};

    fn status_for(error: HandleMessageError) -> StatusCode {
        handle_domain_error(error.into()).status()
    }

    #[test]
    fn inventory_outage_maps_to_503() {
        let error = HandleMessageError::Dialogue(DialogueError::Inventory(
            InventoryError::Unavailable("pool closed".into()),
        ));
        assert_eq!(status_for(error), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn inventory_timeout_maps_to_503() {
        let error = HandleMessageError::Dialogue(DialogueError::Inventory(InventoryError::Timeout));
        assert_eq!(status_for(error), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn query_failure_maps_to_500() {
        let error = HandleMessageError::Dialogue(DialogueError::Inventory(
            InventoryError::QueryFailed("syntax error".into()),
        ));
        assert_eq!(status_for(error), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_transition_maps_to_500() {
        let error = HandleMessageError::Dialogue(DialogueError::InvalidTransition(
            ValidationError::invalid_format("step", "td_phone -> show_more_cars"),
        ));
        assert_eq!(status_for(error), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn storage_failure_maps_to_500() {
        let error = HandleMessageError::Storage(SessionStoreError::IoError("disk full".into()));
        assert_eq!(status_for(error), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn blank_key_maps_to_400() {
        let error: DomainError = ConversationKey::new("  ").unwrap_err().into();
        assert_eq!(
            handle_domain_error(error).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
