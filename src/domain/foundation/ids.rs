//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Caller-resolved key identifying one conversation (e.g. a phone number
/// or a chat thread id). The core never mints these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationKey(String);

impl ConversationKey {
    /// Creates a key, rejecting blank input.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(ValidationError::empty_field("conversation_key"));
        }
        Ok(Self(key))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConversationKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Unique identifier for a committed test-drive booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Creates a new random BookingId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_key_trims_input() {
        let key = ConversationKey::new("  +919876543210 ").unwrap();
        assert_eq!(key.as_str(), "+919876543210");
    }

    #[test]
    fn conversation_key_rejects_blank() {
        assert!(ConversationKey::new("   ").is_err());
        assert!("".parse::<ConversationKey>().is_err());
    }

    #[test]
    fn conversation_key_serializes_transparently() {
        let key = ConversationKey::new("wa-123").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"wa-123\"");
    }

    #[test]
    fn booking_id_displays_as_uuid() {
        let id = BookingId::new();
        assert_eq!(id.to_string(), id.as_uuid().to_string());
    }

    #[test]
    fn booking_ids_are_unique() {
        assert_ne!(BookingId::new(), BookingId::new());
    }
}
