//! Dialogue handlers.
//!
//! The step-indexed state machine that turns one user message into one
//! response, split by sub-flow.

mod booking_steps;
mod browse_steps;
mod controller;
mod errors;
mod results_steps;

#[cfg(test)]
mod test_support;

pub use controller::DialogueController;
pub use errors::DialogueError;
