//! bcrypt password hashing, verification, and work-factor migration.

use bcrypt::HashParts;
use tracing::warn;

use formscore_core::config::AuthConfig;
use formscore_core::error::AppError;

/// Handles password hashing and verification using bcrypt.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// bcrypt cost factor applied to new hashes.
    work_factor: u32,
}

impl PasswordHasher {
    /// Creates a new hasher from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            work_factor: config.password_work_factor,
        }
    }

    /// Creates a hasher with an explicit cost factor.
    pub fn with_work_factor(work_factor: u32) -> Self {
        Self { work_factor }
    }

    /// Hashes a plaintext password at the configured work factor.
    ///
    /// Empty passwords are rejected before hashing.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        if password.is_empty() {
            return Err(AppError::validation("Password must not be empty"));
        }

        bcrypt::hash(password, self.work_factor)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Verifies a plaintext password against a stored bcrypt hash.
    ///
    /// Fails closed: empty input, a malformed hash, or any bcrypt error
    /// all return `false` rather than propagating.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        if password.is_empty() || hash.is_empty() {
            return false;
        }

        match bcrypt::verify(password, hash) {
            Ok(matched) => matched,
            Err(e) => {
                warn!(error = %e, "Password verification failed on malformed hash");
                false
            }
        }
    }

    /// Whether a stored hash was produced at a lower work factor than
    /// currently configured and should be re-hashed on next login.
    ///
    /// A hash whose cost cannot be parsed also needs re-hashing.
    pub fn needs_rehash(&self, hash: &str) -> bool {
        match hash.parse::<HashParts>() {
            Ok(parts) => parts.get_cost() < self.work_factor,
            Err(_) => true,
        }
    }
}
