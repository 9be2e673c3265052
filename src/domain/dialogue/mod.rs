//! Dialogue domain module.
//!
//! The persisted step tag, the per-conversation session record and the
//! response payload a turn produces.

mod response;
mod session;
mod settings;
mod step;
pub mod vocabulary;

pub use response::ResponsePayload;
pub use session::{ResultSet, Session};
pub use settings::DialogueSettings;
pub use step::Step;
