//! Integration tests for token issuance, verification, and session
//! revocation, running against the in-memory session store.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use formscore_auth::token::decode_unverified;
use formscore_auth::{Claims, TokenError, TokenIssuer, TokenType, TokenVerifier};
use formscore_core::config::AuthConfig;
use formscore_store::MemorySessionStore;

fn setup() -> (TokenIssuer, TokenVerifier, AuthConfig) {
    let config = AuthConfig::default();
    let sessions = Arc::new(MemorySessionStore::new());
    let issuer = TokenIssuer::new(&config, sessions.clone());
    let verifier = TokenVerifier::new(&config, sessions);
    (issuer, verifier, config)
}

/// Signs an arbitrary claim set with the given secret, for crafting
/// expired or forged tokens.
fn sign(claims: &Claims, secret: &str) -> String {
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

fn claims(token_type: TokenType, iat: i64, exp: i64) -> Claims {
    Claims {
        sub: Uuid::new_v4(),
        email: "user@example.com".to_string(),
        token_type,
        iat,
        exp,
        jti: Uuid::new_v4(),
        sid: None,
        extra: serde_json::Map::new(),
    }
}

#[tokio::test]
async fn test_access_token_round_trip() {
    let (issuer, verifier, _) = setup();
    let user_id = Uuid::new_v4();

    let mut extra = serde_json::Map::new();
    extra.insert("company".to_string(), serde_json::json!("acme"));
    let issued = issuer
        .issue_access(user_id, "user@example.com", Some(extra))
        .unwrap();

    let claims = verifier.verify(&issued.token, TokenType::Access).await.unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.email, "user@example.com");
    assert_eq!(claims.token_type, TokenType::Access);
    assert_eq!(claims.extra["company"], "acme");
    assert!(claims.sid.is_none());
}

#[tokio::test]
async fn test_token_type_isolation() {
    let (issuer, verifier, _) = setup();
    let user_id = Uuid::new_v4();

    let access = issuer.issue_access(user_id, "user@example.com", None).unwrap();
    let err = verifier
        .verify(&access.token, TokenType::Refresh)
        .await
        .unwrap_err();
    assert_eq!(err, TokenError::TypeMismatch { expected: TokenType::Refresh });

    let (refresh, _) = issuer
        .issue_refresh(user_id, "user@example.com", None, None)
        .await
        .unwrap();
    let err = verifier
        .verify(&refresh.token, TokenType::Access)
        .await
        .unwrap_err();
    assert_eq!(err, TokenError::TypeMismatch { expected: TokenType::Access });
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let (_, verifier, config) = setup();

    let now = Utc::now().timestamp();
    // Past the validation leeway.
    let token = sign(
        &claims(TokenType::Access, now - 7200, now - 3600),
        &config.token_signing_secret,
    );

    let err = verifier.verify(&token, TokenType::Access).await.unwrap_err();
    assert_eq!(err, TokenError::Expired);
}

#[tokio::test]
async fn test_forged_signature_rejected() {
    let (_, verifier, _) = setup();

    let now = Utc::now().timestamp();
    let token = sign(&claims(TokenType::Access, now, now + 3600), "attacker-secret");

    let err = verifier.verify(&token, TokenType::Access).await.unwrap_err();
    assert_eq!(err, TokenError::BadSignature);
}

#[tokio::test]
async fn test_malformed_and_missing_tokens() {
    let (_, verifier, _) = setup();

    assert_eq!(
        verifier.verify("not-a-token", TokenType::Access).await.unwrap_err(),
        TokenError::Malformed
    );
    assert_eq!(
        verifier.verify("", TokenType::Access).await.unwrap_err(),
        TokenError::MissingToken
    );
}

#[tokio::test]
async fn test_refresh_revocation() {
    let (issuer, verifier, _) = setup();
    let user_id = Uuid::new_v4();

    let (refresh, session) = issuer
        .issue_refresh(user_id, "user@example.com", Some("cli/1.0"), Some("10.0.0.1"))
        .await
        .unwrap();

    let claims = verifier.verify(&refresh.token, TokenType::Refresh).await.unwrap();
    assert_eq!(claims.sid, Some(session.id));

    assert!(verifier.revoke(session.id, Some(user_id)).await.unwrap());

    let err = verifier
        .verify(&refresh.token, TokenType::Refresh)
        .await
        .unwrap_err();
    assert_eq!(err, TokenError::SessionRevoked);

    // Already revoked: no row changes.
    assert!(!verifier.revoke(session.id, Some(user_id)).await.unwrap());
}

#[tokio::test]
async fn test_revoke_all_for_user() {
    let (issuer, verifier, _) = setup();
    let user_id = Uuid::new_v4();
    let other = Uuid::new_v4();

    let (refresh, _) = issuer
        .issue_refresh(user_id, "user@example.com", None, None)
        .await
        .unwrap();
    issuer
        .issue_refresh(other, "other@example.com", None, None)
        .await
        .unwrap();

    assert_eq!(verifier.revoke_all_for_user(user_id).await.unwrap(), 1);

    let err = verifier
        .verify(&refresh.token, TokenType::Refresh)
        .await
        .unwrap_err();
    assert_eq!(err, TokenError::SessionRevoked);
}

#[tokio::test]
async fn test_stolen_session_id_defeated_by_hash_check() {
    let (issuer, verifier, config) = setup();
    let user_id = Uuid::new_v4();

    let (_, session) = issuer
        .issue_refresh(user_id, "user@example.com", None, None)
        .await
        .unwrap();

    // A correctly-signed refresh token pointing at an existing session
    // still fails: the session's stored hash is of the original token.
    let now = Utc::now().timestamp();
    let mut forged = claims(TokenType::Refresh, now, now + 3600);
    forged.sub = user_id;
    forged.sid = Some(session.id);
    let token = sign(&forged, &config.token_signing_secret);

    let err = verifier.verify(&token, TokenType::Refresh).await.unwrap_err();
    assert_eq!(err, TokenError::SessionRevoked);
}

#[tokio::test]
async fn test_decode_unverified_is_diagnostic_only() {
    let now = Utc::now().timestamp();
    // Expired and signed with an unknown secret, still decodable.
    let token = sign(&claims(TokenType::Access, now - 7200, now - 3600), "whatever");

    let claims = decode_unverified(&token).unwrap();
    assert_eq!(claims.email, "user@example.com");
    assert_eq!(claims.token_type, TokenType::Access);

    assert!(decode_unverified("garbage").is_none());
}
