//! Bearer-token authentication and permission guards.
//!
//! Framework-neutral: the host passes the raw `Authorization` header
//! value and gets back an identity or a structured failure.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use formscore_core::error::AppError;
use formscore_core::types::Scope;
use formscore_entity::PermissionLevel;

use crate::rbac::RbacEvaluator;
use crate::token::{Claims, TokenError, TokenType, TokenVerifier};

/// The identity established by a verified access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub claims: Claims,
}

/// Front door for request authentication and authorization.
#[derive(Clone)]
pub struct AuthGateway {
    verifier: Arc<TokenVerifier>,
    rbac: Arc<RbacEvaluator>,
}

impl std::fmt::Debug for AuthGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGateway").finish()
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` value.
fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl AuthGateway {
    pub fn new(verifier: Arc<TokenVerifier>, rbac: Arc<RbacEvaluator>) -> Self {
        Self { verifier, rbac }
    }

    /// Authenticates a request from its `Authorization` header.
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
    ) -> Result<AuthenticatedUser, TokenError> {
        let token = authorization
            .and_then(bearer_token)
            .ok_or(TokenError::MissingToken)?;

        let claims = self.verifier.verify(token, TokenType::Access).await?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            email: claims.email.clone(),
            claims,
        })
    }

    /// Like [`authenticate`](Self::authenticate), but a missing or
    /// invalid token yields `None` instead of an error. For endpoints
    /// that adapt to an authenticated caller without requiring one.
    pub async fn optional_authenticate(&self, authorization: Option<&str>) -> Option<AuthenticatedUser> {
        match self.authenticate(authorization).await {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, "Optional authentication not established");
                None
            }
        }
    }

    /// Requires the user to hold the given permission at the given
    /// scope; `Authorization` error on deny.
    pub async fn require_permission(
        &self,
        user: &AuthenticatedUser,
        required_level: PermissionLevel,
        company: &Scope,
        category: &Scope,
    ) -> Result<(), AppError> {
        let allowed = self
            .rbac
            .check_permission(user.user_id, required_level, company, category)
            .await;

        if !allowed {
            return Err(AppError::authorization(format!(
                "Requires {required_level} permission for this scope"
            )));
        }
        Ok(())
    }

    /// Requires an effective super-admin grant.
    pub async fn require_super_admin(&self, user: &AuthenticatedUser) -> Result<(), AppError> {
        if !self.rbac.is_super_admin(user.user_id).await {
            return Err(AppError::authorization("Requires super-admin privileges"));
        }
        Ok(())
    }
}
