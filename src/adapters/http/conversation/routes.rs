//! Route configuration for conversation endpoints.

use axum::routing::{delete, get, post};
use axum::Router;

use super::handlers::{health, reset_conversation, send_message, ConversationAppState};

/// Creates the conversation router with all endpoints.
///
/// Routes:
/// - `POST /api/conversations/:key/messages` - Run one dialogue turn
/// - `DELETE /api/conversations/:key` - Forget a conversation
/// - `GET /health` - Liveness probe
pub fn conversation_router() -> Router<ConversationAppState> {
    Router::new()
        .route("/api/conversations/:key/messages", post(send_message))
        .route("/api/conversations/:key", delete(reset_conversation))
        .route("/health", get(health))
}
