//! Session state store — pages viewed this session, session start time, and
//! the cross-session last-visit timestamp backing returning-visitor
//! detection.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::{KeyValueStorage, LAST_VISIT_KEY, PAGES_VIEWED_KEY, SESSION_START_KEY};

/// How recent a previous visit must be to count as returning.
pub const RETURNING_VISITOR_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Snapshot of the current session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub pages_viewed: u32,
    /// Session start, Unix milliseconds.
    pub session_start: i64,
    /// Last visit across sessions, Unix milliseconds.
    pub last_visit: Option<i64>,
    /// Whole seconds since session start.
    pub time_on_site: i64,
}

/// Reads and mutates session state across the two storage namespaces.
///
/// The design assumes a single UI thread; state is shared but never
/// concurrently mutated within one page context.
#[derive(Clone)]
pub struct SessionStore {
    session: Arc<dyn KeyValueStorage>,
    persistent: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(session: Arc<dyn KeyValueStorage>, persistent: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            session,
            persistent,
        }
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    fn read_i64(storage: &Arc<dyn KeyValueStorage>, key: &str) -> Option<i64> {
        storage.get(key).and_then(|v| v.parse().ok())
    }

    /// Current session snapshot. `time_on_site` is derived from now; a
    /// missing session start reads as "just started".
    pub fn session_data(&self) -> SessionData {
        let now = Self::now_ms();
        let pages_viewed = Self::read_i64(&self.session, PAGES_VIEWED_KEY)
            .unwrap_or(0)
            .max(0) as u32;
        let session_start = Self::read_i64(&self.session, SESSION_START_KEY).unwrap_or(now);
        let last_visit = Self::read_i64(&self.persistent, LAST_VISIT_KEY);

        SessionData {
            pages_viewed,
            session_start,
            last_visit,
            time_on_site: ((now - session_start) / 1000).max(0),
        }
    }

    /// Record a route change: initialize the session start if absent,
    /// increment pages viewed, and stamp the persistent last visit.
    ///
    /// Called once per route change, before any other tracker reads the
    /// session for that view, so downstream checks see the new count.
    pub fn record_page_view(&self) {
        let now = Self::now_ms();

        if self.session.get(SESSION_START_KEY).is_none() {
            self.session.set(SESSION_START_KEY, &now.to_string());
        }

        let pages = Self::read_i64(&self.session, PAGES_VIEWED_KEY).unwrap_or(0) + 1;
        self.session.set(PAGES_VIEWED_KEY, &pages.to_string());
        self.persistent.set(LAST_VISIT_KEY, &now.to_string());

        debug!(pages_viewed = pages, "session updated");
    }

    /// True iff a previous visit happened within the last 7 days.
    pub fn is_returning_visitor(&self) -> bool {
        match Self::read_i64(&self.persistent, LAST_VISIT_KEY) {
            Some(last_visit) => last_visit > Self::now_ms() - RETURNING_VISITOR_WINDOW_MS,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    fn store() -> (SessionStore, Arc<MemoryStorage>, Arc<MemoryStorage>) {
        let session = Arc::new(MemoryStorage::new());
        let persistent = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(session.clone(), persistent.clone());
        (store, session, persistent)
    }

    #[test]
    fn test_first_page_view_initializes_session() {
        let (store, session, persistent) = store();

        store.record_page_view();

        let data = store.session_data();
        assert_eq!(data.pages_viewed, 1);
        assert!(session.get(SESSION_START_KEY).is_some());
        assert!(persistent.get(LAST_VISIT_KEY).is_some());
    }

    #[test]
    fn test_second_page_view_keeps_session_start() {
        let (store, session, _) = store();

        store.record_page_view();
        let started = session.get(SESSION_START_KEY).unwrap();

        store.record_page_view();

        let data = store.session_data();
        assert_eq!(data.pages_viewed, 2);
        assert_eq!(session.get(SESSION_START_KEY).unwrap(), started);
    }

    #[test]
    fn test_time_on_site_derived_from_session_start() {
        let (store, session, _) = store();
        let started = Utc::now().timestamp_millis() - 150_000;
        session.set(SESSION_START_KEY, &started.to_string());

        let data = store.session_data();
        assert!(data.time_on_site >= 150);
        assert!(data.time_on_site < 160);
    }

    #[test]
    fn test_returning_visitor_window() {
        let (store, _, persistent) = store();
        assert!(!store.is_returning_visitor());

        let six_days_ago = Utc::now().timestamp_millis() - 6 * 24 * 60 * 60 * 1000;
        persistent.set(LAST_VISIT_KEY, &six_days_ago.to_string());
        assert!(store.is_returning_visitor());

        let eight_days_ago = Utc::now().timestamp_millis() - 8 * 24 * 60 * 60 * 1000;
        persistent.set(LAST_VISIT_KEY, &eight_days_ago.to_string());
        assert!(!store.is_returning_visitor());
    }

    #[test]
    fn test_session_end_resets_counts_but_not_last_visit() {
        let (store, session, persistent) = store();

        store.record_page_view();
        store.record_page_view();
        session.clear();

        let data = store.session_data();
        assert_eq!(data.pages_viewed, 0);
        assert!(persistent.get(LAST_VISIT_KEY).is_some());
    }
}
