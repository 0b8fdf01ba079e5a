//! In-Memory Session Store Implementation

use chrono::{Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{AdminSession, SessionError, SessionStorePort};

/// 会话有效期上限（一年）
const MAX_TTL_SECS: i64 = 365 * 24 * 3600;

/// 内存会话存储
///
/// 令牌为两个 UUID v4 拼接（256 位中 244 位随机），过期时间在每次访问时顺延
pub struct InMemorySessionStore {
    sessions: DashMap<String, AdminSession>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: Duration::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX).min(MAX_TTL_SECS)),
        }
    }

    fn new_token() -> String {
        format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
    }
}

impl SessionStorePort for InMemorySessionStore {
    fn create(&self, admin_id: Uuid, username: &str) -> AdminSession {
        let now = Utc::now();
        let session = AdminSession {
            token: Self::new_token(),
            admin_id,
            username: username.to_string(),
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions.insert(session.token.clone(), session.clone());
        tracing::debug!(admin_id = %admin_id, sessions = self.sessions.len(), "Session created");
        session
    }

    fn authenticate(&self, token: &str) -> Result<AdminSession, SessionError> {
        let now = Utc::now();
        let mut session = self.sessions.get_mut(token).ok_or(SessionError::NotFound)?;
        if !session.is_expired_at(now) {
            session.expires_at = now + self.ttl;
            return Ok(session.clone());
        }
        drop(session);

        self.sessions.remove(token);
        Err(SessionError::Expired)
    }

    fn revoke(&self, token: &str) -> Result<(), SessionError> {
        self.sessions
            .remove(token)
            .map(|(_, session)| {
                tracing::debug!(admin_id = %session.admin_id, "Session revoked");
            })
            .ok_or(SessionError::NotFound)
    }

    fn revoke_admin(&self, admin_id: Uuid, keep_token: Option<&str>) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|token, session| session.admin_id != admin_id || Some(token.as_str()) == keep_token);
        before.saturating_sub(self.sessions.len())
    }

    fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired_at(now));
        before.saturating_sub(self.sessions.len())
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}

/// 定期清理过期会话
pub fn spawn_session_gc(
    store: Arc<dyn SessionStorePort>,
    interval_secs: u64,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs.max(1)));
        // 第一次 tick 立即返回
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = store.purge_expired();
            if purged > 0 {
                tracing::info!(purged = purged, remaining = store.len(), "Expired sessions purged");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let store = InMemorySessionStore::new(60);
        let admin_id = Uuid::new_v4();

        let session = store.create(admin_id, "editor");
        assert_eq!(session.token.len(), 64);

        let found = store.authenticate(&session.token).unwrap();
        assert_eq!(found.admin_id, admin_id);
        assert!(found.expires_at >= session.expires_at);

        store.revoke(&session.token).unwrap();
        assert_eq!(store.authenticate(&session.token).unwrap_err(), SessionError::NotFound);
        assert_eq!(store.revoke(&session.token).unwrap_err(), SessionError::NotFound);
    }

    #[test]
    fn test_expired_session_is_rejected_and_removed() {
        let store = InMemorySessionStore::new(0);
        let session = store.create(Uuid::new_v4(), "editor");

        assert_eq!(store.authenticate(&session.token).unwrap_err(), SessionError::Expired);
        assert!(store.is_empty());
    }

    #[test]
    fn test_revoke_admin_keeps_current_token() {
        let store = InMemorySessionStore::new(60);
        let admin_id = Uuid::new_v4();
        let keep = store.create(admin_id, "editor");
        store.create(admin_id, "editor");
        let other = store.create(Uuid::new_v4(), "viewer");

        assert_eq!(store.revoke_admin(admin_id, Some(&keep.token)), 1);
        assert!(store.authenticate(&keep.token).is_ok());
        assert!(store.authenticate(&other.token).is_ok());

        assert_eq!(store.revoke_admin(admin_id, None), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_purge_expired() {
        let store = InMemorySessionStore::new(0);
        store.create(Uuid::new_v4(), "a");
        store.create(Uuid::new_v4(), "b");
        assert_eq!(store.purge_expired(), 2);
        assert!(store.is_empty());
    }
}
