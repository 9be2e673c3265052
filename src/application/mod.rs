//! Application layer - Command handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    DialogueController, DialogueError, HandleMessageCommand, HandleMessageError,
    HandleMessageHandler, HandleMessageResult,
};
