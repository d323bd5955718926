//! Token creation with configurable signing and TTL.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::info;
use uuid::Uuid;

use formscore_core::config::AuthConfig;
use formscore_core::error::AppError;
use formscore_entity::Session;
use formscore_store::SessionStore;

use super::claims::{Claims, TokenType};
use super::token_hash;

/// A signed token and its expiry.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Creates signed access and refresh tokens.
///
/// Issuing a refresh token writes a Session row with the hash of the
/// token; issuing an access token has no side effects.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    access_ttl_hours: i64,
    refresh_ttl_days: i64,
    sessions: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl_hours", &self.access_ttl_hours)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.token_signing_secret.as_bytes()),
            access_ttl_hours: config.access_token_ttl_hours as i64,
            refresh_ttl_days: config.refresh_token_ttl_days as i64,
            sessions,
        }
    }

    /// Issues a stateless access token.
    pub fn issue_access(
        &self,
        user_id: Uuid,
        email: &str,
        extra_claims: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(self.access_ttl_hours);

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            token_type: TokenType::Access,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
            sid: None,
            extra: extra_claims.unwrap_or_default(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Issues a refresh token and creates its backing session record.
    pub async fn issue_refresh(
        &self,
        user_id: Uuid,
        email: &str,
        user_agent: Option<&str>,
        ip_address: Option<&str>,
    ) -> Result<(IssuedToken, Session), AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(self.refresh_ttl_days);
        let session_id = Uuid::new_v4();

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            token_type: TokenType::Refresh,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
            sid: Some(session_id),
            extra: serde_json::Map::new(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        let session = Session {
            id: session_id,
            user_id,
            token_hash: token_hash(&token),
            created_at: now,
            expires_at,
            is_active: true,
            revoked_at: None,
            revoked_by: None,
            user_agent: user_agent.map(str::to_string),
            ip_address: ip_address.map(str::to_string),
        };

        self.sessions.insert(&session).await?;

        info!(user_id = %user_id, session_id = %session_id, "Refresh token issued");

        Ok((IssuedToken { token, expires_at }, session))
    }
}
