//! Session management for wizard sessions
//!
//! Each browser tab (or API client) works on its own `WizardSession`. The
//! manager is a plain map; callers wrap it in a lock and keep every critical
//! section synchronous. Sessions live in memory only, so the manager bounds
//! both their number and their idle lifetime.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::domain::aggregates::WizardSession;
use crate::domain::value_objects::SessionId;
use crate::infrastructure::config::SessionConfig;

#[derive(Debug)]
pub struct SessionManager {
    /// Active sessions by session ID
    sessions: HashMap<SessionId, WizardSession>,
    config: SessionConfig,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: HashMap::new(),
            config,
        }
    }

    /// Start a new wizard session with a default character. At capacity the
    /// least recently active session is evicted first.
    pub fn create_session(&mut self) -> SessionId {
        while self.sessions.len() >= self.config.max_sessions.max(1) {
            let Some(oldest) = self
                .sessions
                .values()
                .min_by_key(|session| session.last_active())
                .map(|session| session.id())
            else {
                break;
            };
            self.sessions.remove(&oldest);
            tracing::info!("Evicted wizard session {} to make room", oldest);
        }

        let session_id = SessionId::new();
        self.sessions.insert(
            session_id,
            WizardSession::new(session_id, self.config.max_chat_history),
        );

        tracing::info!("Created new wizard session {}", session_id);
        session_id
    }

    pub fn get_session(&self, session_id: SessionId) -> Option<&WizardSession> {
        self.sessions.get(&session_id)
    }

    pub fn get_session_mut(&mut self, session_id: SessionId) -> Option<&mut WizardSession> {
        self.sessions.get_mut(&session_id)
    }

    /// End a session explicitly
    pub fn remove_session(&mut self, session_id: SessionId) -> Option<WizardSession> {
        let removed = self.sessions.remove(&session_id);
        if removed.is_some() {
            tracing::info!("Removed wizard session {}", session_id);
        }
        removed
    }

    /// Drop every session unchanged for longer than the idle timeout.
    /// Returns how many were removed.
    pub fn evict_idle(&mut self, now: DateTime<Utc>) -> usize {
        let timeout = Duration::minutes(i64::from(self.config.idle_timeout_minutes));
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| now - session.last_active() <= timeout);
        before - self.sessions.len()
    }

    /// Get the number of active sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ChatRole, WizardStep};

    fn manager() -> SessionManager {
        SessionManager::new(SessionConfig::default())
    }

    #[test]
    fn test_create_session() {
        let mut manager = manager();
        let session_id = manager.create_session();

        let session = manager.get_session(session_id).expect("session exists");
        assert_eq!(session.id(), session_id);
        assert_eq!(session.current_step(), WizardStep::NameAndLevel);
        assert_eq!(manager.session_count(), 1);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut manager = manager();
        let first = manager.create_session();
        let second = manager.create_session();

        if let Some(session) = manager.get_session_mut(first) {
            session.commit(|c| c.set_name("Amiri"));
        }

        let name_of = |id| manager.get_session(id).map(|s| s.character().name().to_string());
        assert_eq!(name_of(first).as_deref(), Some("Amiri"));
        assert_eq!(name_of(second).as_deref(), Some(""));
    }

    #[test]
    fn test_unknown_session_is_none() {
        let manager = manager();
        assert!(manager.get_session(SessionId::new()).is_none());
    }

    #[test]
    fn test_remove_session() {
        let mut manager = manager();
        let session_id = manager.create_session();

        assert!(manager.remove_session(session_id).is_some());
        assert!(manager.get_session(session_id).is_none());
        assert!(manager.remove_session(session_id).is_none());
        assert_eq!(manager.session_count(), 0);
    }

    #[test]
    fn test_idle_sessions_are_evicted() {
        let mut manager = SessionManager::new(SessionConfig {
            idle_timeout_minutes: 30,
            ..SessionConfig::default()
        });
        let session_id = manager.create_session();

        assert_eq!(manager.evict_idle(Utc::now() + Duration::minutes(10)), 0);
        assert!(manager.get_session(session_id).is_some());

        assert_eq!(manager.evict_idle(Utc::now() + Duration::minutes(31)), 1);
        assert!(manager.get_session(session_id).is_none());
    }

    #[test]
    fn test_least_recently_active_session_is_evicted_at_capacity() {
        let mut manager = SessionManager::new(SessionConfig {
            max_sessions: 2,
            ..SessionConfig::default()
        });
        let first = manager.create_session();
        let second = manager.create_session();
        if let Some(session) = manager.get_session_mut(first) {
            session.commit(|c| c.set_name("Ezren"));
        }

        let third = manager.create_session();
        assert_eq!(manager.session_count(), 2);
        assert!(manager.get_session(first).is_some());
        assert!(manager.get_session(second).is_none());
        assert!(manager.get_session(third).is_some());
    }

    #[test]
    fn test_sessions_use_configured_chat_history() {
        let mut manager = SessionManager::new(SessionConfig {
            max_chat_history: 1,
            ..SessionConfig::default()
        });
        let session_id = manager.create_session();
        let session = manager.get_session_mut(session_id).expect("session exists");
        session.transcript_mut().push(ChatRole::User, "first");
        session.transcript_mut().push(ChatRole::User, "second");
        assert_eq!(session.transcript().entries().len(), 1);
    }
}
