//! Session Store Port - Persists dialogue sessions between turns.
//!
//! A session is loaded before each turn and saved after it. A missing
//! session is not an error; the caller starts a fresh one.

use async_trait::async_trait;

use crate::domain::dialogue::Session;
use crate::domain::foundation::ConversationKey;

/// Errors that can occur during session storage operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize session: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Port for loading and saving dialogue sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the session for `key`, or `None` if none was saved.
    async fn load(&self, key: &ConversationKey) -> Result<Option<Session>, SessionStoreError>;

    /// Saves `session` under `key`, replacing any previous one.
    async fn save(&self, key: &ConversationKey, session: &Session) -> Result<(), SessionStoreError>;

    /// Removes the session for `key`. Deleting a missing session succeeds.
    async fn delete(&self, key: &ConversationKey) -> Result<(), SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_error_mentions_serialize() {
        let err = SessionStoreError::SerializationFailed("invalid YAML".to_string());
        assert!(err.to_string().contains("serialize"));
    }
}
