//! File-based Session Store Adapter
//!
//! Stores each dialogue session as a YAML file named after its
//! conversation key, so a session can be inspected or edited by hand.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::dialogue::Session;
use crate::domain::foundation::ConversationKey;
use crate::ports::{SessionStore, SessionStoreError};

/// File-based storage for dialogue sessions
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::new("./data/sessions");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Session file for a key. Bytes outside `[A-Za-z0-9_-]` are
    /// hex-escaped so distinct keys never share a file.
    fn session_file_path(&self, key: &ConversationKey) -> PathBuf {
        let mut name = String::with_capacity(key.as_str().len());
        for byte in key.as_str().bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                name.push(byte as char);
            } else {
                name.push_str(&format!("%{:02X}", byte));
            }
        }
        self.base_path.join(format!("{}.yaml", name))
    }

    async fn ensure_dir(&self) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, key: &ConversationKey) -> Result<Option<Session>, SessionStoreError> {
        let file_path = self.session_file_path(key);

        let yaml = match fs::read_to_string(&file_path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionStoreError::IoError(e.to_string())),
        };

        let session = serde_yaml::from_str(&yaml)
            .map_err(|e| SessionStoreError::DeserializationFailed(e.to_string()))?;

        Ok(Some(session))
    }

    async fn save(&self, key: &ConversationKey, session: &Session) -> Result<(), SessionStoreError> {
        self.ensure_dir().await?;

        let yaml = serde_yaml::to_string(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        fs::write(self.session_file_path(key), yaml)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }

    async fn delete(&self, key: &ConversationKey) -> Result<(), SessionStoreError> {
        match fs::remove_file(self.session_file_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionStoreError::IoError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::TestDriveLocation;
    use crate::domain::browse::{BudgetBucket, Preference};
    use crate::domain::dialogue::Step;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn key(raw: &str) -> ConversationKey {
        ConversationKey::new(raw).unwrap()
    }

    fn booking_session() -> Session {
        let mut session = Session {
            step: Step::TestDriveConfirmation,
            selected_car: Some("Hyundai Creta SX".into()),
            ..Default::default()
        };
        session.criteria.budget = Some(BudgetBucket::From5To10Lakh);
        session.criteria.car_type = Some(Preference::Only("SUV".into()));
        session.criteria.brand = Some(Preference::Any);
        session.booking.name = Some("Ravi".into());
        session.booking.location = Some(TestDriveLocation::HomePickup {
            address: Some("42 Brigade Road".into()),
        });
        session
            .booking
            .set_actual_date(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        session
    }

    #[tokio::test]
    async fn save_and_load_preserves_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        let session = booking_session();

        store.save(&key("wa-919876543210"), &session).await.unwrap();
        let loaded = store.load(&key("wa-919876543210")).await.unwrap();

        assert_eq!(loaded, Some(session));
    }

    #[tokio::test]
    async fn load_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        assert_eq!(store.load(&key("nobody")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_is_readable_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        store.save(&key("wa-1"), &booking_session()).await.unwrap();

        let yaml = std::fs::read_to_string(temp_dir.path().join("wa-1.yaml")).unwrap();
        assert!(yaml.contains("step: test_drive_confirmation"));
        assert!(yaml.contains("Hyundai Creta SX"));
    }

    #[tokio::test]
    async fn keys_with_separators_get_distinct_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        store.save(&key("a/b"), &Session::new()).await.unwrap();
        store.save(&key("a_b"), &Session::ended()).await.unwrap();

        assert_eq!(store.load(&key("a/b")).await.unwrap(), Some(Session::new()));
        assert_eq!(store.load(&key("a_b")).await.unwrap(), Some(Session::ended()));
    }

    #[tokio::test]
    async fn corrupt_file_is_deserialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        std::fs::write(temp_dir.path().join("wa-1.yaml"), "step: [unclosed").unwrap();

        let result = store.load(&key("wa-1")).await;

        assert!(matches!(result, Err(SessionStoreError::DeserializationFailed(_))));
    }

    #[tokio::test]
    async fn delete_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        store.save(&key("wa-1"), &Session::new()).await.unwrap();

        store.delete(&key("wa-1")).await.unwrap();
        store.delete(&key("wa-1")).await.unwrap();

        assert!(!temp_dir.path().join("wa-1.yaml").exists());
    }
}
