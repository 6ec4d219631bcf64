use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Duration, NaiveDateTime, Utc};

use crate::models::ConversationContext;

/// Exclusive handle to one session's context. Turns of the same session
/// serialize on it; other sessions are unaffected.
pub type SessionHandle = Arc<tokio::sync::Mutex<ConversationContext>>;

struct SessionEntry {
    context: SessionHandle,
    last_seen: NaiveDateTime,
}

/// Session id -> context registry. The outer lock is held only for map
/// lookups, never across a turn.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionEntry>> {
        // Entries are replaced wholesale, so a poisoned map is still consistent.
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The session's context handle, creating an empty context on first use.
    pub fn checkout(&self, session_id: &str) -> SessionHandle {
        self.checkout_at(session_id, Utc::now().naive_utc())
    }

    pub fn checkout_at(&self, session_id: &str, now: NaiveDateTime) -> SessionHandle {
        let mut sessions = self.lock();
        let entry = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(session = session_id, "new session");
                SessionEntry {
                    context: Arc::new(tokio::sync::Mutex::new(ConversationContext::default())),
                    last_seen: now,
                }
            });
        entry.last_seen = now;
        Arc::clone(&entry.context)
    }

    /// A copy of the session's current context, if the session exists.
    pub async fn snapshot(&self, session_id: &str) -> Option<ConversationContext> {
        let handle = self.lock().get(session_id).map(|e| Arc::clone(&e.context))?;
        let context = handle.lock().await;
        Some(context.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop sessions idle for longer than the TTL. Sessions with a turn in
    /// flight are kept regardless of age.
    pub fn evict_idle(&self) -> usize {
        self.evict_idle_at(Utc::now().naive_utc())
    }

    pub fn evict_idle_at(&self, now: NaiveDateTime) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| {
            Arc::strong_count(&entry.context) > 1 || now - entry.last_seen < self.ttl
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "evicted idle sessions");
        }
        evicted
    }
}
