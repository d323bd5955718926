//! Permission level enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Permission levels available in the RBAC system.
///
/// Levels are ordered by privilege: Admin > Edit > View. A grant at a
/// higher level satisfies checks for every lower level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Read-only access.
    View,
    /// Can view and modify.
    Edit,
    /// Full control, including granting permissions within scope.
    Admin,
}

impl PermissionLevel {
    /// Return the hierarchy rank (higher = more privileged).
    pub fn rank(&self) -> u8 {
        match self {
            Self::View => 1,
            Self::Edit => 2,
            Self::Admin => 3,
        }
    }

    /// Check if this level has at least the given level's privileges.
    pub fn has_at_least(&self, other: PermissionLevel) -> bool {
        self.rank() >= other.rank()
    }

    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = formscore_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            "admin" => Ok(Self::Admin),
            _ => Err(formscore_core::AppError::validation(format!(
                "Invalid permission level: '{s}'. Expected one of: view, edit, admin"
            ))),
        }
    }
}
