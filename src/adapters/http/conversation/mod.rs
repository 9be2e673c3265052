//! HTTP adapter for conversation endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse, ResponsePayload, SendMessageRequest};
pub use handlers::ConversationAppState;
pub use routes::conversation_router;
