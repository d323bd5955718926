//! Session store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use formscore_core::AppResult;
use formscore_entity::Session;
use uuid::Uuid;

/// Adapter over the refresh-token session store.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session: &Session) -> AppResult<()>;

    async fn find(&self, id: Uuid) -> AppResult<Option<Session>>;

    /// Mark a session revoked. Only active rows are touched; returns
    /// whether a row changed.
    async fn update_revocation(
        &self,
        id: Uuid,
        revoked_by: Option<Uuid>,
        revoked_at: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// All sessions for a user that are active and unexpired at `now`.
    async fn find_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<Session>>;

    /// Delete sessions whose expiry is at or before `now`; returns the
    /// number removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
