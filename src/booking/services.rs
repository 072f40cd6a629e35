//! Wizard session management.
//!
//! Live wizards sit in the session cache. A session that has been evicted is
//! rebuilt from its stored snapshot, so the store is the source of truth and
//! the cache only saves the round trip.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::SharedWizard;
use crate::error::{AppError, Result};
use crate::AppState;

use super::models::StoredSession;
use super::responses::WizardView;
use super::storage::{storage_key, StorageError};
use super::wizard::{BookingWizard, WizardError};

/// Why a session could not be brought into the cache
#[derive(Debug)]
enum LoadError {
    Missing,
    Storage(StorageError),
}

fn resume_wizard(state: &AppState, stored: StoredSession) -> BookingWizard {
    BookingWizard::resume(stored, state.availability.clone(), state.region.clone())
}

/// Load a stored session. A stored document that no longer parses is
/// discarded and the session starts over.
async fn load_session(state: &AppState, session_id: Uuid) -> std::result::Result<SharedWizard, LoadError> {
    debug!("Cache MISS for session: {}", session_id);

    let key = storage_key(&state.config.storage_key, session_id);
    let stored = match state.store.load(&key).await {
        Ok(Some(stored)) => stored,
        Ok(None) => return Err(LoadError::Missing),
        Err(StorageError::Serialization(e)) => {
            warn!("Discarding unreadable record {}: {}", key, e);
            StoredSession::default()
        }
        Err(e) => return Err(LoadError::Storage(e)),
    };

    info!("Rehydrated booking session {}", session_id);
    Ok(Arc::new(Mutex::new(resume_wizard(state, stored))))
}

/// Find a session in the cache, falling back to its stored snapshot.
///
/// Concurrent misses for one id share a single load, so a session never has
/// more than one live wizard. Returns `Ok(None)` when neither knows the id.
async fn find_session(state: &AppState, session_id: Uuid) -> Result<Option<SharedWizard>> {
    let loaded = state
        .cache
        .sessions
        .try_get_with(session_id, load_session(state, session_id))
        .await;

    match loaded {
        Ok(wizard) => Ok(Some(wizard)),
        Err(e) => match e.as_ref() {
            LoadError::Missing => Ok(None),
            LoadError::Storage(e) => Err(AppError::Internal(format!(
                "Loading session {}: {}",
                session_id, e
            ))),
        },
    }
}

/// Session by id, or `SessionNotFound`
pub async fn session(state: &AppState, session_id: Uuid) -> Result<SharedWizard> {
    find_session(state, session_id)
        .await?
        .ok_or(AppError::SessionNotFound(session_id))
}

/// Resume `requested` if it is known, otherwise start a new session
pub async fn open_session(state: &AppState, requested: Option<Uuid>) -> Result<WizardView> {
    if let Some(session_id) = requested {
        if let Some(wizard) = find_session(state, session_id).await? {
            let wizard = wizard.lock().await;
            return Ok(WizardView::new(session_id, &wizard));
        }
        debug!("Unknown session {}, starting a new one", session_id);
    }

    let session_id = Uuid::new_v4();
    let wizard = resume_wizard(state, StoredSession::default());
    let key = storage_key(&state.config.storage_key, session_id);
    state.store.save(&key, &wizard.snapshot()).await?;

    let view = WizardView::new(session_id, &wizard);
    state
        .cache
        .sessions
        .insert(session_id, Arc::new(Mutex::new(wizard)))
        .await;
    info!("Opened booking session {}", session_id);
    Ok(view)
}

/// Current view of a session
pub async fn view(state: &AppState, session_id: Uuid) -> Result<WizardView> {
    let wizard = session(state, session_id).await?;
    let wizard = wizard.lock().await;
    Ok(WizardView::new(session_id, &wizard))
}

/// Run one wizard action under the session lock.
///
/// The action runs on a copy of the wizard. The copy replaces the live
/// wizard only once its snapshot is saved, so a failed action or a failed
/// save leaves the session exactly as it was.
pub async fn apply<F>(state: &AppState, session_id: Uuid, action: F) -> Result<WizardView>
where
    F: FnOnce(&mut BookingWizard) -> std::result::Result<(), WizardError>,
{
    let shared = session(state, session_id).await?;
    let mut wizard = shared.lock().await;

    let mut next = wizard.clone();
    action(&mut next)?;

    let snapshot = next.snapshot();
    if snapshot != wizard.snapshot() {
        let key = storage_key(&state.config.storage_key, session_id);
        state.store.save(&key, &snapshot).await?;
        debug!("Saved record for session {}", session_id);
    }

    *wizard = next;
    Ok(WizardView::new(session_id, &wizard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::models::BookingRecord;
    use crate::booking::storage::{BookingStore, MemoryBookingStore};
    use crate::booking::wizard::{ContactInput, EventDetails, WizardStep};
    use crate::test_support::test_state;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Memory store that counts loads and can be switched to failing saves
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryBookingStore,
        fail_saves: AtomicBool,
        loads: AtomicUsize,
    }

    #[async_trait]
    impl BookingStore for FlakyStore {
        async fn load(&self, key: &str) -> std::result::Result<Option<StoredSession>, StorageError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.inner.load(key).await
        }

        async fn save(&self, key: &str, session: &StoredSession) -> std::result::Result<(), StorageError> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(StorageError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk full",
                )));
            }
            self.inner.save(key, session).await
        }
    }

    fn flaky_state() -> (AppState, Arc<FlakyStore>) {
        let store = Arc::new(FlakyStore::default());
        let mut state = test_state();
        state.store = store.clone();
        (state, store)
    }

    fn details() -> EventDetails {
        EventDetails {
            location: "Cocoa Village".to_string(),
            place: None,
            date: "2026-11-10".to_string(),
            slot_id: "slot-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_open_new_session_persists_empty_record() {
        let state = test_state();
        let view = open_session(&state, None).await.unwrap();
        assert_eq!(view.current_step, 1);
        assert_eq!(view.visited_steps, vec![1]);

        let key = storage_key(&state.config.storage_key, view.session_id);
        let stored = state.store.load(&key).await.unwrap().unwrap();
        assert_eq!(stored.record, BookingRecord::default());
        assert_eq!(stored.visited_steps, vec![1]);
    }

    #[tokio::test]
    async fn test_apply_saves_changes() {
        let state = test_state();
        let id = open_session(&state, None).await.unwrap().session_id;

        let view = apply(&state, id, |w| w.submit_event_details(details()))
            .await
            .unwrap();
        assert_eq!(view.current_step, 2);

        let key = storage_key(&state.config.storage_key, id);
        let stored = state.store.load(&key).await.unwrap().unwrap();
        assert_eq!(stored.record.location.as_deref(), Some("Cocoa Village"));
        assert_eq!(stored.record.time_slot.as_deref(), Some("12:00 PM"));
        assert_eq!(stored.visited_steps, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_session_unchanged() {
        let (state, store) = flaky_state();
        let id = open_session(&state, None).await.unwrap().session_id;

        store.fail_saves.store(true, Ordering::SeqCst);
        let err = apply(&state, id, |w| w.submit_event_details(details()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(StorageError::Io(_))));

        let after = view(&state, id).await.unwrap();
        assert_eq!(after.current_step, 1);
        assert_eq!(after.visited_steps, vec![1]);
        assert_eq!(after.record.location, None);

        // The same submission goes through once the store recovers
        store.fail_saves.store(false, Ordering::SeqCst);
        let retried = apply(&state, id, |w| w.submit_event_details(details()))
            .await
            .unwrap();
        assert_eq!(retried.current_step, 2);
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_wizard() {
        let (state, store) = flaky_state();
        let id = open_session(&state, None).await.unwrap().session_id;
        state.cache.sessions.invalidate(&id).await;

        let (a, b) = tokio::join!(session(&state, id), session(&state, id));
        let (a, b) = (a.unwrap(), b.unwrap());
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_action_leaves_store_untouched() {
        let state = test_state();
        let id = open_session(&state, None).await.unwrap().session_id;

        let err = apply(&state, id, |w| w.submit_contact(ContactInput::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Wizard(WizardError::InvalidTransition { .. })));
        assert_eq!(view(&state, id).await.unwrap().current_step, 1);
    }

    #[tokio::test]
    async fn test_evicted_session_rehydrates_from_store() {
        let state = test_state();
        let id = open_session(&state, None).await.unwrap().session_id;
        apply(&state, id, |w| w.submit_event_details(details()))
            .await
            .unwrap();

        state.cache.sessions.invalidate(&id).await;

        let view = open_session(&state, Some(id)).await.unwrap();
        assert_eq!(view.session_id, id);
        assert_eq!(view.current_step, WizardStep::EventDetails.number());
        assert_eq!(view.visited_steps, vec![1, 2]);
        assert_eq!(view.record.location.as_deref(), Some("Cocoa Village"));
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let state = test_state();
        let missing = Uuid::new_v4();
        assert!(matches!(
            view(&state, missing).await,
            Err(AppError::SessionNotFound(id)) if id == missing
        ));

        let view = open_session(&state, Some(missing)).await.unwrap();
        assert_ne!(view.session_id, missing);
    }
}
