//! In-memory user store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use formscore_core::{AppError, AppResult};
use formscore_entity::{User, UserStatus};
use uuid::Uuid;

use crate::traits::UserStore;

/// `DashMap`-backed [`UserStore`] with an email uniqueness index.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<Uuid, User>,
    by_email: DashMap<String, Uuid>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_mut_or_not_found(
        &self,
        id: Uuid,
    ) -> AppResult<dashmap::mapref::one::RefMut<'_, Uuid, User>> {
        self.users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &User) -> AppResult<()> {
        // The email index entry doubles as the uniqueness check.
        match self.by_email.entry(user.email.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict("Email already registered"));
            }
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.by_email.get(email).map(|entry| *entry) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn record_login_success(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        let mut user = self.get_mut_or_not_found(id)?;
        user.failed_login_attempts = 0;
        user.account_locked_until = None;
        user.last_login_at = Some(at);
        Ok(())
    }

    async fn record_login_failure(
        &self,
        id: Uuid,
        attempts: i32,
        locked_until: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let mut user = self.get_mut_or_not_found(id)?;
        user.failed_login_attempts = attempts;
        if locked_until.is_some() {
            user.account_locked_until = locked_until;
        }
        Ok(())
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        changed_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut user = self.get_mut_or_not_found(id)?;
        user.password_hash = password_hash.to_string();
        user.password_changed_at = changed_at;
        Ok(())
    }

    async fn set_status(&self, id: Uuid, status: UserStatus) -> AppResult<()> {
        let mut user = self.get_mut_or_not_found(id)?;
        user.status = status;
        Ok(())
    }
}
