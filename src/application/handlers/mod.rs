//! Application handlers.
//!
//! The dialogue state machine and the command handler that drives it
//! turn by turn against stored sessions.

pub mod conversation;
pub mod dialogue;

pub use conversation::{
    HandleMessageCommand, HandleMessageError, HandleMessageHandler, HandleMessageResult,
};
pub use dialogue::{DialogueController, DialogueError};
