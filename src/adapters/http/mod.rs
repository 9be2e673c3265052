//! HTTP adapters - REST API implementations.
//!
//! The conversation endpoints and the router that wraps them in tracing,
//! timeout and CORS layers.

pub mod conversation;
mod router;

pub use conversation::{conversation_router, ConversationAppState};
pub use router::app_router;
