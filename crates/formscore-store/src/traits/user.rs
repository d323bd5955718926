//! User store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use formscore_core::AppResult;
use formscore_entity::{User, UserStatus};
use uuid::Uuid;

/// Adapter over the user account store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user. Fails with `Conflict` if the email is taken.
    async fn insert(&self, user: &User) -> AppResult<()>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Lookup by normalized (lowercased, trimmed) email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Reset the failure counter, clear any lockout, and stamp
    /// `last_login_at`.
    async fn record_login_success(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()>;

    /// Store the new failure count and optional lockout deadline.
    async fn record_login_failure(
        &self,
        id: Uuid,
        attempts: i32,
        locked_until: Option<DateTime<Utc>>,
    ) -> AppResult<()>;

    /// Replace the password hash and stamp `password_changed_at`.
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        changed_at: DateTime<Utc>,
    ) -> AppResult<()>;

    async fn set_status(&self, id: Uuid, status: UserStatus) -> AppResult<()>;
}
