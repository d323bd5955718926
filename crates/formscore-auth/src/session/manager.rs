//! Account lifecycle manager — register, login, refresh, logout flows.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use formscore_core::config::AuthConfig;
use formscore_core::error::AppError;
use formscore_entity::{Session, User, UserStatus};
use formscore_store::UserStore;

use crate::password::{PasswordHasher, PasswordValidator};
use crate::token::{IssuedToken, TokenIssuer, TokenType, TokenVerifier};

/// Generic credential failure; identical for unknown email and wrong
/// password so responses cannot be used to enumerate accounts.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginResult {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
    pub session: Session,
    pub user: User,
}

/// Manages the complete account and session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    users: Arc<dyn UserStore>,
    issuer: Arc<TokenIssuer>,
    verifier: Arc<TokenVerifier>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    auth_config: AuthConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("auth_config", &self.auth_config)
            .finish()
    }
}

/// Lowercases and trims an email for storage and lookup.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        users: Arc<dyn UserStore>,
        issuer: Arc<TokenIssuer>,
        verifier: Arc<TokenVerifier>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        auth_config: AuthConfig,
    ) -> Self {
        Self {
            users,
            issuer,
            verifier,
            hasher,
            validator,
            auth_config,
        }
    }

    /// Registers a new user account.
    ///
    /// The email is normalized before storage; the password must pass
    /// the configured policy. A taken email is a `Conflict`.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<User, AppError> {
        let email = normalize_email(email);
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("A valid email address is required"));
        }

        self.validator.validate(password)?;
        let password_hash = self.hasher.hash_password(password)?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            full_name: full_name.trim().to_string(),
            status: UserStatus::Active,
            failed_login_attempts: 0,
            account_locked_until: None,
            created_at: now,
            last_login_at: None,
            password_changed_at: now,
        };

        self.users.insert(&user).await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Performs the complete login flow:
    ///
    /// 1. Look up the user by normalized email
    /// 2. Check account status and lockout
    /// 3. Verify the password, counting failures toward lockout
    /// 4. Reset the failure counter and opportunistically re-hash
    /// 5. Issue an access + refresh token pair
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        user_agent: Option<&str>,
        ip_address: Option<&str>,
    ) -> Result<LoginResult, AppError> {
        let email = normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_CREDENTIALS))?;

        let now = Utc::now();
        if !user.can_login(now) {
            if user.is_locked(now) {
                warn!(user_id = %user.id, "Login attempt on locked account");
                return Err(AppError::authentication(
                    "Account is temporarily locked due to repeated failed logins",
                ));
            }
            return Err(AppError::authorization("Account is inactive"));
        }

        if !self.hasher.verify_password(password, &user.password_hash) {
            self.handle_failed_login(&user).await?;
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        self.users.record_login_success(user.id, now).await?;
        self.maybe_rehash(&user, password).await;

        let access = self.issuer.issue_access(user.id, &user.email, None)?;
        let (refresh, session) = self
            .issuer
            .issue_refresh(user.id, &user.email, user_agent, ip_address)
            .await?;

        info!(user_id = %user.id, session_id = %session.id, "Login successful");

        Ok(LoginResult {
            access,
            refresh,
            session,
            user,
        })
    }

    /// Increments the failure counter, locking the account when the
    /// configured threshold is reached.
    async fn handle_failed_login(&self, user: &User) -> Result<(), AppError> {
        let attempts = user.failed_login_attempts + 1;
        let locked_until = if attempts >= self.auth_config.max_failed_logins {
            warn!(
                user_id = %user.id,
                attempts = attempts,
                "Account locked after repeated failed logins"
            );
            Some(
                Utc::now()
                    + chrono::Duration::minutes(self.auth_config.lockout_duration_minutes as i64),
            )
        } else {
            None
        };

        self.users
            .record_login_failure(user.id, attempts, locked_until)
            .await
    }

    /// Re-hashes the password when the stored hash was produced at a
    /// lower work factor. Best effort; a failure never blocks login.
    async fn maybe_rehash(&self, user: &User, password: &str) {
        if !self.hasher.needs_rehash(&user.password_hash) {
            return;
        }
        match self.hasher.hash_password(password) {
            Ok(new_hash) => {
                // Keep the original change timestamp: the password
                // itself did not change.
                if let Err(e) = self
                    .users
                    .update_password(user.id, &new_hash, user.password_changed_at)
                    .await
                {
                    warn!(user_id = %user.id, error = %e, "Opportunistic re-hash failed");
                } else {
                    info!(user_id = %user.id, "Password re-hashed at current work factor");
                }
            }
            Err(e) => warn!(user_id = %user.id, error = %e, "Opportunistic re-hash failed"),
        }
    }

    /// Issues a fresh access token from a valid refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<IssuedToken, AppError> {
        let claims = self
            .verifier
            .verify(refresh_token, TokenType::Refresh)
            .await?;

        self.issuer.issue_access(claims.sub, &claims.email, None)
    }

    /// Revokes the session behind a refresh token.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        let claims = self
            .verifier
            .verify(refresh_token, TokenType::Refresh)
            .await?;

        // verify() guarantees sid is present for refresh tokens.
        if let Some(session_id) = claims.sid {
            self.verifier.revoke(session_id, Some(claims.sub)).await?;
        }

        info!(user_id = %claims.sub, "Logout completed");
        Ok(())
    }

    /// Revokes every active session for a user; returns the count.
    pub async fn logout_all(&self, user_id: Uuid) -> Result<u64, AppError> {
        self.verifier.revoke_all_for_user(user_id).await
    }

    /// Changes a user's password after verifying the current one, then
    /// revokes every active session.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)
        {
            return Err(AppError::authentication("Current password is incorrect"));
        }

        self.validator
            .validate_not_same(current_password, new_password)?;
        self.validator.validate(new_password)?;

        let new_hash = self.hasher.hash_password(new_password)?;
        self.users
            .update_password(user.id, &new_hash, Utc::now())
            .await?;

        let revoked = self.verifier.revoke_all_for_user(user.id).await?;
        info!(
            user_id = %user.id,
            sessions_revoked = revoked,
            "Password changed"
        );

        Ok(())
    }
}
