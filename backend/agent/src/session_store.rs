//! Concurrent map of live sessions.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use wayfarer_core::WayfarerError;

use crate::session_state::{SessionId, SessionState};

pub type SharedSession = Arc<Mutex<SessionState>>;

/// Sessions keyed by id.
///
/// The map lock is only held for lookup, insert and removal. Each session has
/// its own mutex, which serializes turns within that session.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SharedSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new session. A live session is never replaced.
    pub async fn insert(&self, state: SessionState) -> Result<SharedSession, WayfarerError> {
        match self.sessions.write().await.entry(state.session_id.clone()) {
            Entry::Occupied(entry) => Err(WayfarerError::SessionExists(entry.key().clone())),
            Entry::Vacant(entry) => {
                let session = Arc::new(Mutex::new(state));
                entry.insert(Arc::clone(&session));
                Ok(session)
            }
        }
    }

    pub async fn get(&self, session_id: &str) -> Option<SharedSession> {
        self.sessions.read().await.get(session_id).cloned()
    }

    pub async fn remove(&self, session_id: &str) -> Option<SharedSession> {
        self.sessions.write().await.remove(session_id)
    }

    pub async fn contains(&self, session_id: &str) -> bool {
        self.sessions.read().await.contains_key(session_id)
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_core::{ChatMessage, Persona, PersonaId, RunConfig};

    fn state(id: &str) -> SessionState {
        let entry = Persona::new(PersonaId::Orchestrator, "route", RunConfig::default());
        SessionState::new(id, &entry)
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let store = SessionStore::new();
        store.insert(state("a")).await.unwrap();
        store.insert(state("b")).await.unwrap();
        assert_eq!(store.count().await, 2);
        assert!(store.contains("b").await);

        let a = store.get("a").await.unwrap();
        assert_eq!(a.lock().await.session_id, "a");

        assert!(store.remove("a").await.is_some());
        assert!(store.get("a").await.is_none());
        assert!(store.remove("a").await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::new();
        store.insert(state("a")).await.unwrap();
        store.insert(state("b")).await.unwrap();

        let a = store.get("a").await.unwrap();
        let _held = a.lock().await;
        // Holding one session's lock does not block another session.
        let b = store.get("b").await.unwrap();
        assert!(b.try_lock().is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_id_keeps_live_session() {
        let store = SessionStore::new();
        let first = store.insert(state("a")).await.unwrap();
        first
            .lock()
            .await
            .commit_turn(ChatMessage::user("hi"), ChatMessage::assistant("hello"));

        let err = store.insert(state("a")).await.unwrap_err();
        assert!(matches!(err, WayfarerError::SessionExists(id) if id == "a"));

        let kept = store.get("a").await.unwrap();
        assert_eq!(kept.lock().await.history.len(), 2);
        assert_eq!(store.count().await, 1);
    }
}
