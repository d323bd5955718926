//! JWT access/refresh token lifecycle.
//!
//! Access tokens are stateless; refresh tokens are backed by a Session
//! row holding the SHA-256 hash of the issued token, so they can be
//! revoked server-side.

pub mod claims;
pub mod issuer;
pub mod verifier;

use sha2::{Digest, Sha256};

pub use claims::{Claims, TokenType};
pub use issuer::{IssuedToken, TokenIssuer};
pub use verifier::{TokenVerifier, decode_unverified};

use formscore_core::error::AppError;

/// Why a token failed verification.
///
/// The distinct kinds let callers produce a correct user-facing message
/// without inspecting strings. Conversion into [`AppError`] collapses
/// them into the `Authentication` kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Token signature is invalid")]
    BadSignature,
    #[error("Token is malformed")]
    Malformed,
    #[error("Expected a {expected} token")]
    TypeMismatch { expected: TokenType },
    #[error("Session has been revoked or is no longer valid")]
    SessionRevoked,
    #[error("No token provided")]
    MissingToken,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::authentication(err.to_string())
    }
}

/// Hex-encoded SHA-256 of a token string, as stored in Session rows.
pub fn token_hash(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
