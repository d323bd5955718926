//! User account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserStatus;

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Lowercased, trimmed email. Unique per store.
    pub email: String,
    /// bcrypt hash. Never serialized out of the store layer.
    #[serde(skip_serializing)]
    #[serde(default)]
    pub password_hash: String,
    pub full_name: String,
    pub status: UserStatus,
    /// Consecutive failed login attempts since the last success.
    pub failed_login_attempts: i32,
    /// Set when the lockout threshold is reached; logins are rejected
    /// until this instant passes.
    pub account_locked_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub password_changed_at: DateTime<Utc>,
}

impl User {
    /// Whether the account is currently locked out.
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        match self.account_locked_until {
            Some(until) => until > now,
            None => false,
        }
    }

    /// Whether the account may attempt a login at `now`.
    pub fn can_login(&self, now: DateTime<Utc>) -> bool {
        self.status == UserStatus::Active && !self.is_locked(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            full_name: "Test User".to_string(),
            status: UserStatus::Active,
            failed_login_attempts: 0,
            account_locked_until: None,
            created_at: now,
            last_login_at: None,
            password_changed_at: now,
        }
    }

    #[test]
    fn test_active_user_can_login() {
        assert!(sample_user().can_login(Utc::now()));
    }

    #[test]
    fn test_inactive_user_cannot_login() {
        let mut user = sample_user();
        user.status = UserStatus::Inactive;
        assert!(!user.can_login(Utc::now()));
    }

    #[test]
    fn test_lockout_expires() {
        let now = Utc::now();
        let mut user = sample_user();
        user.account_locked_until = Some(now + Duration::minutes(30));
        assert!(user.is_locked(now));
        assert!(!user.can_login(now));

        user.account_locked_until = Some(now - Duration::seconds(1));
        assert!(!user.is_locked(now));
        assert!(user.can_login(now));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("email").is_some());
    }
}
