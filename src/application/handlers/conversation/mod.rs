//! Conversation command handlers.
//!
//! Runs dialogue turns against stored sessions and resets conversations.

mod handle_message;

pub use handle_message::{
    HandleMessageCommand, HandleMessageError, HandleMessageHandler, HandleMessageResult,
};
