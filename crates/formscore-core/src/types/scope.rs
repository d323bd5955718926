//! Permission scope type.
//!
//! A permission grant and a permission check each carry a `(company,
//! category)` scope pair. Either position may be a wildcard: on a grant it
//! means "all companies" / "all categories", on a check it means "the
//! caller did not narrow the request". Both meanings share the same
//! dominance rules, so a single type covers them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One position of a `(company, category)` scope pair.
///
/// Serialized as a nullable string: `Any` ⇔ `null`, `Specific(v)` ⇔ `"v"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Scope {
    /// Wildcard: every company (or category).
    #[default]
    Any,
    /// A single named company (or category).
    Specific(String),
}

impl Scope {
    /// Build a scope from an optional name, treating `None` as the wildcard.
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            Some(v) => Self::Specific(v.to_string()),
            None => Self::Any,
        }
    }

    /// Whether this scope is the wildcard.
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// The specific name, if any.
    pub fn as_specific(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::Specific(v) => Some(v.as_str()),
        }
    }

    /// Whether a grant-side scope position satisfies a requested position.
    ///
    /// A wildcard grant satisfies any request; a specific grant satisfies a
    /// request that is either unnarrowed or names the same value.
    pub fn satisfies(&self, requested: &Scope) -> bool {
        match self {
            Self::Any => true,
            Self::Specific(v) => match requested {
                Self::Any => true,
                Self::Specific(r) => v == r,
            },
        }
    }
}

impl From<Option<String>> for Scope {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) => Self::Specific(v),
            None => Self::Any,
        }
    }
}

impl From<Scope> for Option<String> {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Any => None,
            Scope::Specific(v) => Some(v),
        }
    }
}

impl From<&str> for Scope {
    fn from(value: &str) -> Self {
        Self::Specific(value.to_string())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "*"),
            Self::Specific(v) => write!(f, "{v}"),
        }
    }
}
