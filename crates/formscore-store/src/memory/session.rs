//! In-memory session store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use formscore_core::AppResult;
use formscore_entity::Session;
use uuid::Uuid;

use crate::traits::SessionStore;

/// `DashMap`-backed [`SessionStore`].
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<Uuid, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: &Session) -> AppResult<()> {
        self.sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<Session>> {
        Ok(self.sessions.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update_revocation(
        &self,
        id: Uuid,
        revoked_by: Option<Uuid>,
        revoked_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let Some(mut entry) = self.sessions.get_mut(&id) else {
            return Ok(false);
        };
        if !entry.is_active {
            return Ok(false);
        }
        entry.is_active = false;
        entry.revoked_by = revoked_by;
        entry.revoked_at = Some(revoked_at);
        Ok(true)
    }

    async fn find_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<Session>> {
        Ok(self
            .sessions
            .iter()
            .filter(|entry| entry.user_id == user_id && entry.is_live(now))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut removed = 0u64;
        self.sessions.retain(|_, session| {
            if session.expires_at > now {
                true
            } else {
                removed += 1;
                false
            }
        });
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session_for(user_id: Uuid, expires_at: DateTime<Utc>) -> Session {
        Session {
            id: Uuid::new_v4(),
            user_id,
            token_hash: "hash".to_string(),
            created_at: Utc::now(),
            expires_at,
            is_active: true,
            revoked_at: None,
            revoked_by: None,
            user_agent: None,
            ip_address: None,
        }
    }

    #[tokio::test]
    async fn test_revocation_is_one_way() {
        let store = MemorySessionStore::new();
        let session = session_for(Uuid::new_v4(), Utc::now() + Duration::days(30));
        store.insert(&session).await.unwrap();

        assert!(
            store
                .update_revocation(session.id, None, Utc::now())
                .await
                .unwrap()
        );
        assert!(
            !store
                .update_revocation(session.id, None, Utc::now())
                .await
                .unwrap()
        );

        let stored = store.find(session.id).await.unwrap().unwrap();
        assert!(!stored.is_active);
        assert!(stored.revoked_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_expired_purges_only_past_expiry() {
        let store = MemorySessionStore::new();
        let now = Utc::now();
        let user_id = Uuid::new_v4();
        let live = session_for(user_id, now + Duration::days(1));
        let expired = session_for(user_id, now - Duration::seconds(1));
        store.insert(&live).await.unwrap();
        store.insert(&expired).await.unwrap();

        let removed = store.delete_expired(now).await.unwrap();
        assert_eq!(removed, 1);
        assert!(store.find(live.id).await.unwrap().is_some());
        assert!(store.find(expired.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_active_excludes_revoked_and_expired() {
        let store = MemorySessionStore::new();
        let now = Utc::now();
        let user_id = Uuid::new_v4();

        let live = session_for(user_id, now + Duration::days(1));
        let expired = session_for(user_id, now - Duration::seconds(1));
        let mut revoked = session_for(user_id, now + Duration::days(1));
        revoked.is_active = false;

        store.insert(&live).await.unwrap();
        store.insert(&expired).await.unwrap();
        store.insert(&revoked).await.unwrap();

        let active = store.find_active_by_user(user_id, now).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, live.id);
    }
}
