//! Permission grant model.

use chrono::{DateTime, Utc};
use formscore_core::types::Scope;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::PermissionLevel;

/// Who issued a grant.
///
/// Bootstrap grants are issued by the system itself rather than by a
/// user; the distinction is kept explicit instead of overloading a
/// sentinel user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Grantor {
    /// Issued during bootstrap, outside any user's authority.
    System,
    /// Issued by the given user.
    User(Uuid),
}

impl From<Grantor> for String {
    fn from(g: Grantor) -> Self {
        match g {
            Grantor::System => "system".to_string(),
            Grantor::User(id) => id.to_string(),
        }
    }
}

impl TryFrom<String> for Grantor {
    type Error = uuid::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s == "system" {
            Ok(Grantor::System)
        } else {
            Ok(Grantor::User(s.parse()?))
        }
    }
}

impl fmt::Display for Grantor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grantor::System => write!(f, "system"),
            Grantor::User(id) => write!(f, "{id}"),
        }
    }
}

/// A scoped permission grant.
///
/// `company`/`category` of [`Scope::Any`] mean the grant covers every
/// company or category. Revocation is one-way: a revoked grant is never
/// reactivated, a replacement grant is issued instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub id: Uuid,
    /// The user the grant applies to.
    pub user_id: Uuid,
    pub company: Scope,
    pub category: Scope,
    pub level: PermissionLevel,
    pub granted_by: Grantor,
    pub granted_at: DateTime<Utc>,
    /// `None` means the grant never expires.
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub revoked_by: Option<Uuid>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl PermissionGrant {
    /// Whether the grant participates in permission evaluation at `now`:
    /// active and not past its expiry.
    pub fn is_effective_at(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }
        match self.expires_at {
            Some(expiry) => expiry > now,
            None => true,
        }
    }
}

/// Input for creating a new permission grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantPermission {
    pub user_id: Uuid,
    #[serde(default)]
    pub company: Scope,
    #[serde(default)]
    pub category: Scope,
    pub level: PermissionLevel,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}
