//! Token validation and session revocation.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::{info, warn};
use uuid::Uuid;

use formscore_core::config::AuthConfig;
use formscore_core::error::AppError;
use formscore_store::SessionStore;

use super::claims::{Claims, TokenType};
use super::{TokenError, token_hash};

/// Validates tokens and manages session revocation.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    sessions: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig, sessions: Arc<dyn SessionStore>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.token_signing_secret.as_bytes()),
            validation,
            sessions,
        }
    }

    /// Verifies a token's signature, expiry, and declared type.
    ///
    /// For refresh tokens the backing session is additionally checked:
    /// it must exist, be active, be unexpired, and its stored hash must
    /// match the presented token. Every session failure, including a
    /// store error, is reported as `SessionRevoked` — verification
    /// denies under ambiguity.
    pub async fn verify(&self, token: &str, expected_type: TokenType) -> Result<Claims, TokenError> {
        if token.is_empty() {
            return Err(TokenError::MissingToken);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                JwtErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            })?;

        if claims.token_type != expected_type {
            return Err(TokenError::TypeMismatch {
                expected: expected_type,
            });
        }

        if expected_type == TokenType::Refresh {
            self.check_session(token, &claims).await?;
        }

        Ok(claims)
    }

    /// Checks that the session backing a refresh token is still live
    /// and that the token is the one the session was created for.
    async fn check_session(&self, token: &str, claims: &Claims) -> Result<(), TokenError> {
        let session_id = claims.sid.ok_or(TokenError::SessionRevoked)?;

        let session = match self.sessions.find(session_id).await {
            Ok(Some(session)) => session,
            Ok(None) => return Err(TokenError::SessionRevoked),
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Session lookup failed, denying");
                return Err(TokenError::SessionRevoked);
            }
        };

        if !session.is_live(Utc::now()) {
            return Err(TokenError::SessionRevoked);
        }

        if session.token_hash != token_hash(token) {
            warn!(session_id = %session_id, "Refresh token hash mismatch");
            return Err(TokenError::SessionRevoked);
        }

        Ok(())
    }

    /// Marks a session inactive. Returns whether a row was actually
    /// changed (`false` = not found or already revoked).
    pub async fn revoke(
        &self,
        session_id: Uuid,
        revoked_by: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let changed = self
            .sessions
            .update_revocation(session_id, revoked_by, Utc::now())
            .await?;
        if changed {
            info!(session_id = %session_id, "Session revoked");
        }
        Ok(changed)
    }

    /// Bulk-revokes every active session for a user; returns the count.
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, AppError> {
        let now = Utc::now();
        let active = self.sessions.find_active_by_user(user_id, now).await?;

        let mut revoked = 0u64;
        for session in active {
            if self
                .sessions
                .update_revocation(session.id, Some(user_id), now)
                .await?
            {
                revoked += 1;
            }
        }

        info!(user_id = %user_id, count = revoked, "Revoked all sessions for user");
        Ok(revoked)
    }
}

/// Decodes a token payload without checking signature or expiry.
///
/// Diagnostics only — never use the result on an authorization path.
/// Returns `None` on structurally invalid input.
pub fn decode_unverified(token: &str) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .ok()
}
