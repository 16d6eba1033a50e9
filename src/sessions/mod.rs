//! In-memory session store.
//!
//! A session records which data sources a client has connected, keyed by the
//! client-generated session id. Sessions are created lazily on the first
//! successful connect and evicted after a configurable idle period; nothing
//! survives a process restart.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::sync::Cache;
use thiserror::Error;
use tracing::debug;

use crate::catalog;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid data source")]
    UnknownSource,
    #[error("No session found. Please connect a data source first.")]
    SessionNotFound,
    #[error("No data sources connected")]
    NoSourcesConnected,
}

#[derive(Debug)]
pub struct Session {
    pub id: String,
    /// Catalog source ids in first-connection order, no duplicates.
    pub connected_sources: Vec<&'static str>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            connected_sources: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Concurrency-safe map of session id to session state.
///
/// Entries are `Arc<Mutex<_>>` so a connect racing a generate-validation read
/// for the same session serializes on the entry lock; the lock is never held
/// across an await point.
pub struct SessionStore {
    sessions: Cache<String, Arc<Mutex<Session>>>,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(100_000)
                .time_to_idle(idle_ttl)
                .build(),
        }
    }

    /// Connect a data source to a session, creating the session if absent.
    ///
    /// Rejects unknown source ids before touching the map, so a failed
    /// connect never creates a session. Adding an already-connected source is
    /// a no-op. Returns the display names of all connected sources in the
    /// order they were first connected.
    pub fn connect(
        &self,
        session_id: &str,
        source_id: &str,
    ) -> Result<Vec<&'static str>, StoreError> {
        let source = catalog::find_source(source_id).ok_or(StoreError::UnknownSource)?;

        let entry = self.sessions.get_with(session_id.to_string(), || {
            debug!(session_id, "creating session");
            Arc::new(Mutex::new(Session::new(session_id)))
        });
        let mut session = entry.lock().unwrap_or_else(PoisonError::into_inner);

        if !session.connected_sources.contains(&source.id) {
            session.connected_sources.push(source.id);
        }

        Ok(session
            .connected_sources
            .iter()
            .filter_map(|id| catalog::find_source(id))
            .map(|s| s.name)
            .collect())
    }

    /// Source ids connected to a session, in first-connection order.
    pub fn connected_sources(&self, session_id: &str) -> Result<Vec<&'static str>, StoreError> {
        let entry = self
            .sessions
            .get(session_id)
            .ok_or(StoreError::SessionNotFound)?;
        let session = entry.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(session.connected_sources.clone())
    }

    /// Validation step for campaign generation: the session must exist and
    /// have at least one connected source.
    pub fn sources_for_generation(
        &self,
        session_id: &str,
    ) -> Result<Vec<&'static str>, StoreError> {
        let sources = self.connected_sources(session_id)?;
        if sources.is_empty() {
            return Err(StoreError::NoSourcesConnected);
        }
        Ok(sources)
    }

    #[cfg(test)]
    fn insert_empty(&self, session_id: &str) {
        self.sessions.insert(
            session_id.to_string(),
            Arc::new(Mutex::new(Session::new(session_id))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(Duration::from_secs(3600))
    }

    #[test]
    fn connect_creates_session_and_returns_display_name() {
        let store = store();
        let names = store.connect("s1", "shopify").unwrap();
        assert_eq!(names, vec!["Shopify Store"]);
        assert_eq!(store.connected_sources("s1").unwrap(), vec!["shopify"]);
    }

    #[test]
    fn connect_is_idempotent() {
        let store = store();
        let first = store.connect("s1", "shopify").unwrap();
        let second = store.connect("s1", "shopify").unwrap();
        assert_eq!(first, second);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn connect_preserves_first_connection_order() {
        let store = store();
        store.connect("s1", "shopify").unwrap();
        store.connect("s1", "klaviyo").unwrap();
        let names = store.connect("s1", "shopify").unwrap();
        assert_eq!(names, vec!["Shopify Store", "Klaviyo"]);
    }

    #[test]
    fn unknown_source_is_rejected_without_creating_the_session() {
        let store = store();
        assert_eq!(
            store.connect("s1", "unknown-x"),
            Err(StoreError::UnknownSource)
        );
        assert_eq!(
            store.connected_sources("s1"),
            Err(StoreError::SessionNotFound)
        );
    }

    #[test]
    fn unknown_source_leaves_an_existing_session_unchanged() {
        let store = store();
        store.connect("s1", "shopify").unwrap();
        assert_eq!(
            store.connect("s1", "unknown-x"),
            Err(StoreError::UnknownSource)
        );
        assert_eq!(store.connected_sources("s1").unwrap(), vec!["shopify"]);
    }

    #[test]
    fn generation_requires_a_known_session() {
        let store = store();
        assert_eq!(
            store.sources_for_generation("nope"),
            Err(StoreError::SessionNotFound)
        );
    }

    #[test]
    fn generation_requires_at_least_one_source() {
        let store = store();
        store.insert_empty("s1");
        assert_eq!(
            store.sources_for_generation("s1"),
            Err(StoreError::NoSourcesConnected)
        );
        store.connect("s1", "stripe").unwrap();
        assert_eq!(store.sources_for_generation("s1").unwrap(), vec!["stripe"]);
    }

    #[test]
    fn sessions_are_independent() {
        let store = store();
        store.connect("a", "shopify").unwrap();
        store.connect("b", "klaviyo").unwrap();
        assert_eq!(store.connected_sources("a").unwrap(), vec!["shopify"]);
        assert_eq!(store.connected_sources("b").unwrap(), vec!["klaviyo"]);
    }
}
