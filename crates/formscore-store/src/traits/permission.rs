//! Permission grant store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use formscore_core::AppResult;
use formscore_core::types::Scope;
use formscore_entity::PermissionGrant;
use uuid::Uuid;

/// Filter for admin permission listings.
#[derive(Debug, Clone, Default)]
pub struct PermissionFilter {
    pub user_id: Option<Uuid>,
    pub company: Option<Scope>,
    pub category: Option<Scope>,
    /// When `true`, include revoked grants as well.
    pub include_inactive: bool,
}

/// Adapter over the permission grant store.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Persist a new grant.
    async fn insert(&self, grant: &PermissionGrant) -> AppResult<()>;

    /// All grants for a user, active and revoked alike, newest first.
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<PermissionGrant>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PermissionGrant>>;

    /// Mark a grant revoked: flip `is_active`, stamp `revoked_by` /
    /// `revoked_at`, and append `notes` to any existing notes. Only
    /// active rows are touched; returns the number of rows changed.
    async fn update_revocation(
        &self,
        id: Uuid,
        revoked_by: Uuid,
        revoked_at: DateTime<Utc>,
        notes: Option<&str>,
    ) -> AppResult<u64>;

    /// Filtered listing across all users, newest first.
    async fn list(&self, filter: &PermissionFilter) -> AppResult<Vec<PermissionGrant>>;
}
