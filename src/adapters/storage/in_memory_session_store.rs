//! In-Memory Session Store Adapter
//!
//! Keeps dialogue sessions in a shared map.
//! Useful for testing and single-process deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialogue::Session;
use crate::domain::foundation::ConversationKey;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for dialogue sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<ConversationKey, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, key: &ConversationKey) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.sessions.read().await.get(key).cloned())
    }

    async fn save(&self, key: &ConversationKey, session: &Session) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .insert(key.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, key: &ConversationKey) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::Step;

    fn key(raw: &str) -> ConversationKey {
        ConversationKey::new(raw).unwrap()
    }

    #[tokio::test]
    async fn load_missing_session_is_none() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.load(&key("wa-1")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_load_returns_same_session() {
        let store = InMemorySessionStore::new();
        let session = Session {
            step: Step::TdPhone,
            selected_car: Some("Hyundai Creta SX".into()),
            ..Default::default()
        };

        store.save(&key("wa-1"), &session).await.unwrap();

        assert_eq!(store.load(&key("wa-1")).await.unwrap(), Some(session));
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated_by_key() {
        let store = InMemorySessionStore::new();
        store.save(&key("wa-1"), &Session::ended()).await.unwrap();

        assert_eq!(store.load(&key("wa-2")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_removes_session_and_tolerates_missing() {
        let store = InMemorySessionStore::new();
        store.save(&key("wa-1"), &Session::new()).await.unwrap();

        store.delete(&key("wa-1")).await.unwrap();
        store.delete(&key("wa-1")).await.unwrap();

        assert_eq!(store.session_count().await, 0);
    }
}
