//! HandleMessageHandler - Runs one dialogue turn against a stored session.
//!
//! Load, advance, save. Turns for the same conversation are serialized
//! through a per-key async mutex; different conversations proceed in
//! parallel. A failed turn leaves the stored session untouched.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::application::handlers::dialogue::{DialogueController, DialogueError};
use crate::domain::dialogue::{ResponsePayload, Session, Step};
use crate::domain::foundation::{ConversationKey, DomainError, ErrorCode};
use crate::ports::{SessionStore, SessionStoreError};

/// Command to process one inbound user message.
#[derive(Debug, Clone)]
pub struct HandleMessageCommand {
    pub key: ConversationKey,
    pub message: String,
}

/// Outcome of a processed turn.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleMessageResult {
    /// `None` when nothing should be sent back.
    pub response: Option<ResponsePayload>,
    /// Step the session was saved at.
    pub step: Step,
}

/// Errors from a turn.
#[derive(Debug, thiserror::Error)]
pub enum HandleMessageError {
    #[error(transparent)]
    Dialogue(#[from] DialogueError),

    #[error("Session storage failed: {0}")]
    Storage(#[from] SessionStoreError),
}

impl From<HandleMessageError> for DomainError {
    fn from(err: HandleMessageError) -> Self {
        match err {
            HandleMessageError::Dialogue(e) => e.into(),
            HandleMessageError::Storage(e) => {
                DomainError::new(ErrorCode::StorageError, e.to_string())
            }
        }
    }
}

type TurnLocks = Mutex<HashMap<ConversationKey, Arc<Mutex<()>>>>;

/// Handler for inbound conversation messages.
pub struct HandleMessageHandler {
    controller: Arc<DialogueController>,
    sessions: Arc<dyn SessionStore>,
    locks: TurnLocks,
}

impl HandleMessageHandler {
    pub fn new(controller: Arc<DialogueController>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            controller,
            sessions,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleMessageCommand,
    ) -> Result<HandleMessageResult, HandleMessageError> {
        let lock = self.lock_for(&cmd.key).await;
        let result = {
            let _turn = lock.lock().await;
            self.run_turn(&cmd).await
        };
        drop(lock);
        self.release(&cmd.key).await;
        result
    }

    /// Forgets the conversation. Waits for an in-flight turn to finish.
    pub async fn reset(&self, key: &ConversationKey) -> Result<(), HandleMessageError> {
        let lock = self.lock_for(key).await;
        let result = {
            let _turn = lock.lock().await;
            self.sessions.delete(key).await
        };
        drop(lock);
        self.release(key).await;

        result?;
        info!(conversation = %key, "Conversation reset");
        Ok(())
    }

    async fn run_turn(
        &self,
        cmd: &HandleMessageCommand,
    ) -> Result<HandleMessageResult, HandleMessageError> {
        let mut session = match self.sessions.load(&cmd.key).await {
            Ok(Some(session)) => session,
            Ok(None) => {
                debug!(conversation = %cmd.key, "No stored session, starting fresh");
                Session::new()
            }
            // Unreadable record: the controller answers with its restart prompt.
            Err(SessionStoreError::DeserializationFailed(reason)) => {
                warn!(conversation = %cmd.key, %reason, "Stored session is corrupt, discarding it");
                Session {
                    step: Step::Unrecognized,
                    ..Default::default()
                }
            }
            Err(e) => return Err(e.into()),
        };

        let response = match self
            .controller
            .advance(&mut session, &cmd.key, &cmd.message)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(conversation = %cmd.key, step = %session.step, error = %e, "Turn failed, session not saved");
                return Err(e.into());
            }
        };

        self.sessions.save(&cmd.key, &session).await?;

        Ok(HandleMessageResult {
            response,
            step: session.step,
        })
    }

    async fn lock_for(&self, key: &ConversationKey) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(key.clone()).or_default().clone()
    }

    /// Drops the key's mutex once no turn holds or awaits it.
    async fn release(&self, key: &ConversationKey) {
        let mut locks = self.locks.lock().await;
        if locks
            .get(key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(key);
        }
    }

    #[cfg(test)]
    async fn tracked_keys(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::booking::InMemoryBookingStore;
    use crate::adapters::calendar::SystemCalendar;
    use crate::adapters::extractor::MockSlotExtractor;
    use crate::adapters::inventory::InMemoryInventory;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::adapters::validation::FuzzyInputValidator;
    use crate::ports::InventoryError;

    struct Fixture {
        handler: Arc<HandleMessageHandler>,
        sessions: InMemorySessionStore,
        inventory: InMemoryInventory,
    }

    fn fixture() -> Fixture {
        let inventory = InMemoryInventory::with_demo_stock();
        let sessions = InMemorySessionStore::new();
        let controller = DialogueController::new(
            Arc::new(inventory.clone()),
            Arc::new(MockSlotExtractor::new()),
            Arc::new(FuzzyInputValidator::new()),
            Arc::new(SystemCalendar::new()),
            Arc::new(InMemoryBookingStore::new()),
        );
        Fixture {
            handler: Arc::new(HandleMessageHandler::new(
                Arc::new(controller),
                Arc::new(sessions.clone()),
            )),
            sessions,
            inventory,
        }
    }

    fn key() -> ConversationKey {
        ConversationKey::new("wa-919811112222").unwrap()
    }

    fn cmd(message: &str) -> HandleMessageCommand {
        HandleMessageCommand {
            key: key(),
            message: message.to_string(),
        }
    }

    async fn store_at(sessions: &InMemorySessionStore, step: Step) {
        let session = Session {
            step,
            ..Default::default()
        };
        sessions.save(&key(), &session).await.unwrap();
    }

    #[tokio::test]
    async fn first_message_starts_a_fresh_session() {
        let f = fixture();

        let result = f.handler.handle(cmd("show me cars")).await.unwrap();

        assert_eq!(result.step, Step::BrowseBudget);
        let stored = f.sessions.load(&key()).await.unwrap().unwrap();
        assert_eq!(stored.step, Step::BrowseBudget);
        assert_eq!(
            result.response.unwrap().message,
            "Great! We'll help you find cars. First, what's your budget range?"
        );
    }

    #[tokio::test]
    async fn failed_turn_keeps_stored_session() {
        let f = fixture();
        store_at(&f.sessions, Step::BrowseBudget).await;
        f.inventory
            .set_failure(Some(InventoryError::Unavailable("db down".into())))
            .await;

        let result = f.handler.handle(cmd("₹5-10 Lakhs")).await;

        assert!(matches!(result, Err(HandleMessageError::Dialogue(_))));
        let stored = f.sessions.load(&key()).await.unwrap().unwrap();
        assert_eq!(stored.step, Step::BrowseBudget);
        assert_eq!(stored.criteria.budget, None);
    }

    #[tokio::test]
    async fn end_conversation_is_saved_with_no_response() {
        let f = fixture();
        store_at(&f.sessions, Step::BookingComplete).await;

        let result = f.handler.handle(cmd("End Conversation")).await.unwrap();

        assert_eq!(result.response, None);
        let stored = f.sessions.load(&key()).await.unwrap().unwrap();
        assert!(stored.conversation_ended);
    }

    #[tokio::test]
    async fn same_key_turns_are_serialized() {
        let f = fixture();
        store_at(&f.sessions, Step::TdName).await;

        let a = tokio::spawn({
            let handler = f.handler.clone();
            async move { handler.handle(cmd("Ravi Kumar")).await }
        });
        let b = tokio::spawn({
            let handler = f.handler.clone();
            async move { handler.handle(cmd("9876543210")).await }
        });
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let stored = f.sessions.load(&key()).await.unwrap().unwrap();
        assert_eq!(stored.step, Step::TdLicense);
        assert!(stored.booking.name.is_some());
        assert!(stored.booking.phone.is_some());
        assert_eq!(f.handler.tracked_keys().await, 0);
    }

    #[tokio::test]
    async fn reset_deletes_session() {
        let f = fixture();
        store_at(&f.sessions, Step::TdPhone).await;

        f.handler.reset(&key()).await.unwrap();

        assert_eq!(f.sessions.load(&key()).await.unwrap(), None);
        assert_eq!(f.handler.tracked_keys().await, 0);
    }

    mod corrupt_session {
        use super::*;
        use crate::adapters::storage::FileSessionStore;
        use tempfile::TempDir;

        const CORRUPT_YAML: &str = "step: browse_type\ncriteria:\n  budget: \"₹7 Lakhs\"\n";

        fn file_backed(dir: &TempDir) -> HandleMessageHandler {
            let controller = DialogueController::new(
                Arc::new(InMemoryInventory::with_demo_stock()),
                Arc::new(MockSlotExtractor::new()),
                Arc::new(FuzzyInputValidator::new()),
                Arc::new(SystemCalendar::new()),
                Arc::new(InMemoryBookingStore::new()),
            );
            HandleMessageHandler::new(
                Arc::new(controller),
                Arc::new(FileSessionStore::new(dir.path())),
            )
        }

        #[tokio::test]
        async fn greeting_recovers_the_conversation() {
            let dir = TempDir::new().unwrap();
            std::fs::write(dir.path().join("wa-919811112222.yaml"), CORRUPT_YAML).unwrap();
            let handler = file_backed(&dir);

            let result = handler.handle(cmd("hi")).await.unwrap();

            assert_eq!(result.step, Step::BrowseStart);
            assert_eq!(
                result.response.unwrap().option_labels(),
                ["🚗 Browse Used Cars"]
            );
        }

        #[tokio::test]
        async fn other_input_gets_restart_prompt_and_fresh_record() {
            let dir = TempDir::new().unwrap();
            std::fs::write(dir.path().join("wa-919811112222.yaml"), CORRUPT_YAML).unwrap();
            let handler = file_backed(&dir);

            let result = handler.handle(cmd("SUV")).await.unwrap();

            assert_eq!(
                result.response.unwrap().message,
                "Something went wrong. Let's start again."
            );
            let store = FileSessionStore::new(dir.path());
            assert_eq!(store.load(&key()).await.unwrap(), Some(Session::new()));

            let next = handler.handle(cmd("show me cars")).await.unwrap();
            assert_eq!(next.step, Step::BrowseBudget);
        }
    }

    #[test]
    fn storage_error_maps_to_storage_code() {
        let err = HandleMessageError::Storage(SessionStoreError::IoError("disk full".into()));
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::StorageError);
    }
}
