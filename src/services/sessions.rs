// src/services/sessions.rs
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// How long a pending login may sit between redirect and callback.
pub const SESSION_TTL: Duration = Duration::from_secs(600);

#[derive(Debug)]
struct SessionEntry {
    oauth_state: String,
    created_at: Instant,
}

impl SessionEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Cookie-keyed store for the transient OAuth state token.
///
/// One entry per session cookie, holding only the pending anti-forgery
/// token. Entries are consumed on callback and purged on the next login
/// initiation once the TTL has passed.
#[derive(Debug)]
pub struct SessionService {
    entries: RwLock<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl SessionService {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Record a pending OAuth state under the caller's session, reusing the
    /// presented session id when there is one. Returns the session id the
    /// cookie should carry.
    pub async fn begin(&self, existing_id: Option<&str>, oauth_state: String) -> String {
        let session_id = match existing_id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };

        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| !entry.is_expired(self.ttl));
        entries.insert(
            session_id.clone(),
            SessionEntry {
                oauth_state,
                created_at: Instant::now(),
            },
        );

        debug!(session_id = %session_id, "Stored pending OAuth state");
        session_id
    }

    /// Consume the pending state for a session. Read-once: a second call
    /// for the same session returns `None`, as does an expired entry.
    pub async fn take_state(&self, session_id: &str) -> Option<String> {
        let mut entries = self.entries.write().await;
        let entry = entries.remove(session_id)?;
        if entry.is_expired(self.ttl) {
            debug!(session_id = %session_id, "Pending OAuth state expired");
            return None;
        }
        Some(entry.oauth_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_state_round_trip() {
        let sessions = SessionService::new(SESSION_TTL);

        let id = sessions.begin(None, "state-1".to_string()).await;
        assert_eq!(sessions.take_state(&id).await.as_deref(), Some("state-1"));
    }

    #[tokio::test]
    async fn test_state_is_read_once() {
        let sessions = SessionService::new(SESSION_TTL);

        let id = sessions.begin(None, "state-1".to_string()).await;
        assert!(sessions.take_state(&id).await.is_some());
        assert!(sessions.take_state(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_session_has_no_state() {
        let sessions = SessionService::new(SESSION_TTL);

        assert!(sessions.take_state("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_existing_session_id_is_reused() {
        let sessions = SessionService::new(SESSION_TTL);

        let id = sessions
            .begin(Some("existing-session"), "state-1".to_string())
            .await;
        assert_eq!(id, "existing-session");
    }

    #[tokio::test]
    async fn test_relogin_replaces_pending_state() {
        let sessions = SessionService::new(SESSION_TTL);

        let id = sessions.begin(None, "old-state".to_string()).await;
        let id = sessions.begin(Some(&id), "new-state".to_string()).await;

        assert_eq!(sessions.take_state(&id).await.as_deref(), Some("new-state"));
    }

    #[tokio::test]
    async fn test_expired_state_is_not_returned() {
        let sessions = SessionService::new(Duration::ZERO);

        let id = sessions.begin(None, "state-1".to_string()).await;
        assert!(sessions.take_state(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let sessions = SessionService::new(SESSION_TTL);

        let first = sessions.begin(None, "state-a".to_string()).await;
        let second = sessions.begin(None, "state-b".to_string()).await;

        assert_ne!(first, second);
        assert_eq!(sessions.take_state(&second).await.as_deref(), Some("state-b"));
        assert_eq!(sessions.take_state(&first).await.as_deref(), Some("state-a"));
    }
}
