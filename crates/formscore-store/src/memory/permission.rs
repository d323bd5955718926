//! In-memory permission grant store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use formscore_core::AppResult;
use formscore_entity::PermissionGrant;
use uuid::Uuid;

use crate::traits::{PermissionFilter, PermissionStore};

/// `DashMap`-backed [`PermissionStore`].
#[derive(Debug, Default)]
pub struct MemoryPermissionStore {
    grants: DashMap<Uuid, PermissionGrant>,
}

impl MemoryPermissionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(grants: &mut Vec<PermissionGrant>) {
    grants.sort_by(|a, b| b.granted_at.cmp(&a.granted_at));
}

#[async_trait]
impl PermissionStore for MemoryPermissionStore {
    async fn insert(&self, grant: &PermissionGrant) -> AppResult<()> {
        self.grants.insert(grant.id, grant.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<PermissionGrant>> {
        let mut results: Vec<PermissionGrant> = self
            .grants
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        newest_first(&mut results);
        Ok(results)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PermissionGrant>> {
        Ok(self.grants.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update_revocation(
        &self,
        id: Uuid,
        revoked_by: Uuid,
        revoked_at: DateTime<Utc>,
        notes: Option<&str>,
    ) -> AppResult<u64> {
        let Some(mut entry) = self.grants.get_mut(&id) else {
            return Ok(0);
        };
        if !entry.is_active {
            return Ok(0);
        }
        entry.is_active = false;
        entry.revoked_by = Some(revoked_by);
        entry.revoked_at = Some(revoked_at);
        if let Some(note) = notes {
            entry.notes = match entry.notes.take() {
                Some(existing) => Some(format!("{existing}; {note}")),
                None => Some(note.to_string()),
            };
        }
        Ok(1)
    }

    async fn list(&self, filter: &PermissionFilter) -> AppResult<Vec<PermissionGrant>> {
        let mut results: Vec<PermissionGrant> = self
            .grants
            .iter()
            .filter(|entry| {
                if let Some(user_id) = filter.user_id {
                    if entry.user_id != user_id {
                        return false;
                    }
                }
                if let Some(ref company) = filter.company {
                    if &entry.company != company {
                        return false;
                    }
                }
                if let Some(ref category) = filter.category {
                    if &entry.category != category {
                        return false;
                    }
                }
                filter.include_inactive || entry.is_active
            })
            .map(|entry| entry.value().clone())
            .collect();
        newest_first(&mut results);
        Ok(results)
    }
}
