//! Concurrent chat session storage.
//!
//! [`ChatRegistry`] maps session ids to a [`ChatEntry`]. The outer map is
//! only write-locked to add or drop a session; each transcript has its own
//! lock so sessions never wait on each other. Idle sessions expire and the
//! map is capped, so abandoned conversations do not pile up.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use super::ChatSession;
use crate::domain::ChatMessage;
use crate::error::GatewayError;

/// Idle time after which a session is dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Default number of sessions kept at once.
pub const DEFAULT_CAPACITY: usize = 1000;

/// One live conversation: the session capability plus its transcript.
#[derive(Debug)]
pub struct ChatEntry {
    /// Session identifier.
    pub id: Uuid,
    /// Live or offline session chosen at creation.
    pub session: Box<dyn ChatSession>,
    /// Every message exchanged, greeting first.
    pub transcript: RwLock<Vec<ChatMessage>>,
    last_active: Mutex<Instant>,
}

impl ChatEntry {
    /// Wraps `session` with a transcript that opens with the greeting.
    #[must_use]
    pub fn new(session: Box<dyn ChatSession>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session,
            transcript: RwLock::new(vec![ChatMessage::greeting()]),
            last_active: Mutex::new(Instant::now()),
        }
    }

    /// Last time the session was created or looked up.
    pub fn last_active(&self) -> Instant {
        *self
            .last_active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn touch(&self) {
        *self
            .last_active
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    fn is_expired(&self, now: Instant, idle_timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_active()) > idle_timeout
    }
}

/// All open chat sessions.
///
/// Sessions idle past `idle_timeout` are invisible to lookups and are
/// dropped on the next [`ChatRegistry::insert`] or
/// [`ChatRegistry::sweep`]. At `capacity`, inserting evicts the least
/// recently active session.
#[derive(Debug)]
pub struct ChatRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<ChatEntry>>>,
    idle_timeout: Duration,
    capacity: usize,
}

impl Default for ChatRegistry {
    fn default() -> Self {
        Self::with_limits(DEFAULT_IDLE_TIMEOUT, DEFAULT_CAPACITY)
    }
}

impl ChatRegistry {
    /// Creates an empty registry with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with explicit limits. A zero capacity is
    /// treated as one.
    #[must_use]
    pub fn with_limits(idle_timeout: Duration, capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
            capacity: capacity.max(1),
        }
    }

    /// Idle time after which sessions are dropped.
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Stores a session and returns a handle to it.
    pub async fn insert(&self, entry: ChatEntry) -> Arc<ChatEntry> {
        let entry = Arc::new(entry);
        let mut sessions = self.sessions.write().await;

        let now = Instant::now();
        sessions.retain(|_, e| !e.is_expired(now, self.idle_timeout));
        while sessions.len() >= self.capacity {
            let Some(oldest) = sessions
                .values()
                .min_by_key(|e| e.last_active())
                .map(|e| e.id)
            else {
                break;
            };
            sessions.remove(&oldest);
            tracing::info!(session_id = %oldest, "chat session evicted, registry full");
        }

        sessions.insert(entry.id, Arc::clone(&entry));
        entry
    }

    /// Looks up a session and marks it active.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::SessionNotFound`] if the id is unknown or the
    /// session has been idle too long.
    pub async fn get(&self, id: Uuid) -> Result<Arc<ChatEntry>, GatewayError> {
        let entry = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .filter(|e| !e.is_expired(Instant::now(), self.idle_timeout))
            .ok_or(GatewayError::SessionNotFound(id))?;
        entry.touch();
        Ok(entry)
    }

    /// Drops a session. In-flight sends on it finish normally.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::SessionNotFound`] if the id is unknown.
    pub async fn remove(&self, id: Uuid) -> Result<(), GatewayError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(GatewayError::SessionNotFound(id))
    }

    /// Drops every idle session and returns how many went.
    pub async fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, e| !e.is_expired(now, self.idle_timeout));
        before - sessions.len()
    }

    /// Number of stored sessions, idle ones included until swept.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns `true` if no session is stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
