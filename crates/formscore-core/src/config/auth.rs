//! Authentication and credential configuration.

use serde::{Deserialize, Serialize};

/// Placeholder signing secret shipped in default configs.
///
/// Rejected by [`crate::config::AppConfig::validate`] outside development.
pub const INSECURE_DEFAULT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_signing_secret")]
    pub token_signing_secret: String,
    /// Access token TTL in hours.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_hours: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: u64,
    /// bcrypt cost factor for password hashing.
    #[serde(default = "default_work_factor")]
    pub password_work_factor: u32,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub min_password_length: usize,
    /// Require at least one uppercase letter in passwords.
    #[serde(default = "default_true")]
    pub require_uppercase: bool,
    /// Require at least one lowercase letter in passwords.
    #[serde(default = "default_true")]
    pub require_lowercase: bool,
    /// Require at least one digit in passwords.
    #[serde(default = "default_true")]
    pub require_digit: bool,
    /// Require at least one special character in passwords.
    #[serde(default = "default_true")]
    pub require_special: bool,
    /// Maximum failed login attempts before lockout.
    #[serde(default = "default_max_failed")]
    pub max_failed_logins: i32,
    /// Account lockout duration in minutes.
    #[serde(default = "default_lockout")]
    pub lockout_duration_minutes: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_signing_secret: default_signing_secret(),
            access_token_ttl_hours: default_access_ttl(),
            refresh_token_ttl_days: default_refresh_ttl(),
            password_work_factor: default_work_factor(),
            min_password_length: default_password_min(),
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
            max_failed_logins: default_max_failed(),
            lockout_duration_minutes: default_lockout(),
        }
    }
}

fn default_signing_secret() -> String {
    INSECURE_DEFAULT_SECRET.to_string()
}

fn default_access_ttl() -> u64 {
    24
}

fn default_refresh_ttl() -> u64 {
    30
}

fn default_work_factor() -> u32 {
    12
}

fn default_password_min() -> usize {
    8
}

fn default_max_failed() -> i32 {
    5
}

fn default_lockout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}
