//! Abstract response payload handed back to the transport.

use serde::{Deserialize, Serialize};

use crate::domain::pagination::DisplayUnit;

/// What to send the user for one turn.
///
/// The transport decides how `options` become buttons and how `messages`
/// are rendered; the dialogue only orders them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<DisplayUnit>>,
}

impl ResponsePayload {
    /// Plain text, no buttons.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            options: None,
            messages: None,
        }
    }

    /// Text with button options.
    pub fn with_options<I, S>(message: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            message: message.into(),
            options: Some(options.into_iter().map(Into::into).collect()),
            messages: None,
        }
    }

    /// Attaches structured display units.
    pub fn and_messages(mut self, messages: Vec<DisplayUnit>) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Button labels, empty when none were attached.
    pub fn option_labels(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }
}
