//! Booking session persistence (file, memory).
//!
//! One JSON document per storage key. The file store writes to a temp file
//! and renames it into place so a crash never leaves a half-written record.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::StoredSession;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable storage for wizard sessions keyed by string
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// `Ok(None)` when nothing was stored under `key`
    async fn load(&self, key: &str) -> Result<Option<StoredSession>, StorageError>;
    async fn save(&self, key: &str, session: &StoredSession) -> Result<(), StorageError>;
}

/// Storage key of a wizard session
pub fn storage_key(prefix: &str, session_id: Uuid) -> String {
    format!("{}-{}", prefix, session_id)
}

/// JSON file per key under a data directory
#[derive(Debug, Clone)]
pub struct FileBookingStore {
    dir: PathBuf,
}

impl FileBookingStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys are reduced to a safe file name; anything outside
    /// `[A-Za-z0-9_-]` becomes `_`.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

#[async_trait]
impl BookingStore for FileBookingStore {
    async fn load(&self, key: &str) -> Result<Option<StoredSession>, StorageError> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn save(&self, key: &str, session: &StoredSession) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(session)?;
        fs::write(&tmp_path, bytes).await?;
        fs::rename(&tmp_path, &path).await?;
        Ok(())
    }
}

/// In-memory store for tests (does not persist across restarts)
#[derive(Debug, Default)]
pub struct MemoryBookingStore {
    sessions: RwLock<HashMap<String, StoredSession>>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn load(&self, key: &str) -> Result<Option<StoredSession>, StorageError> {
        Ok(self.sessions.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, session: &StoredSession) -> Result<(), StorageError> {
        self.sessions
            .write()
            .await
            .insert(key.to_string(), session.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::models::{BookingRecord, ContactDetails, PaymentStatus};
    use chrono::NaiveDate;

    fn temp_store() -> FileBookingStore {
        FileBookingStore::new(std::env::temp_dir().join(format!("openair-store-{}", Uuid::new_v4())))
    }

    fn session() -> StoredSession {
        let record = BookingRecord {
            date: NaiveDate::from_ymd_opt(2026, 12, 5),
            location: Some("Winebar Downtown, Orlando".to_string()),
            time_slot: Some("8:00 PM".to_string()),
            contact: ContactDetails {
                first_name: Some("Alex".to_string()),
                email: Some("alex@example.com".to_string()),
                ..Default::default()
            },
            payment_status: Some(PaymentStatus::Completed),
            ..Default::default()
        };
        StoredSession {
            record,
            visited_steps: vec![1, 2, 3, 4, 5],
        }
    }

    #[test]
    fn test_storage_key() {
        let id = Uuid::nil();
        assert_eq!(
            storage_key("bookingWizardData", id),
            "bookingWizardData-00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_path_sanitized() {
        let store = FileBookingStore::new("/data");
        assert_eq!(store.path_for("../etc/passwd"), PathBuf::from("/data/___etc_passwd.json"));
    }

    #[tokio::test]
    async fn test_file_round_trip() {
        let store = temp_store();
        assert!(store.load("bookingWizardData-a").await.unwrap().is_none());

        store.save("bookingWizardData-a", &session()).await.unwrap();
        let loaded = store.load("bookingWizardData-a").await.unwrap();
        assert_eq!(loaded, Some(session()));
        assert!(!store.dir().join("bookingWizardData-a.json.tmp").exists());

        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[tokio::test]
    async fn test_file_corrupt_record_is_error() {
        let store = temp_store();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(store.dir().join("broken.json"), b"{not json").unwrap();

        assert!(matches!(
            store.load("broken").await,
            Err(StorageError::Serialization(_))
        ));

        let _ = std::fs::remove_dir_all(store.dir());
    }

    #[tokio::test]
    async fn test_memory_round_trip() {
        let store = MemoryBookingStore::new();
        store.save("k", &session()).await.unwrap();
        assert_eq!(store.load("k").await.unwrap(), Some(session()));
        assert_eq!(store.len().await, 1);
    }
}
