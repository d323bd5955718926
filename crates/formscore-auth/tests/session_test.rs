//! Integration tests for the account lifecycle: register, login,
//! lockout, refresh, logout, and password change.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use formscore_auth::{
    PasswordHasher, PasswordValidator, SessionCleanup, SessionManager, TokenIssuer, TokenType,
    TokenVerifier,
};
use formscore_core::ErrorKind;
use formscore_core::config::AuthConfig;
use formscore_entity::{Session, UserStatus};
use formscore_store::{MemorySessionStore, MemoryUserStore, SessionStore, UserStore};

const STRONG_PASSWORD: &str = "v9#Kq2zL!mWx7pT4";
const OTHER_STRONG_PASSWORD: &str = "Xr4$nB8qJ!dF2sYh";

struct Harness {
    manager: SessionManager,
    verifier: Arc<TokenVerifier>,
    users: Arc<MemoryUserStore>,
    sessions: Arc<MemorySessionStore>,
}

fn setup() -> Harness {
    let config = AuthConfig {
        // Low cost keeps the tests fast.
        password_work_factor: 4,
        max_failed_logins: 3,
        ..AuthConfig::default()
    };

    let users = Arc::new(MemoryUserStore::new());
    let sessions = Arc::new(MemorySessionStore::new());
    let issuer = Arc::new(TokenIssuer::new(&config, sessions.clone()));
    let verifier = Arc::new(TokenVerifier::new(&config, sessions.clone()));
    let hasher = Arc::new(PasswordHasher::new(&config));
    let validator = Arc::new(PasswordValidator::new(&config));

    let manager = SessionManager::new(
        users.clone(),
        issuer,
        verifier.clone(),
        hasher,
        validator,
        config,
    );

    Harness {
        manager,
        verifier,
        users,
        sessions,
    }
}

#[tokio::test]
async fn test_register_and_login_round_trip() {
    let h = setup();

    let user = h
        .manager
        .register("  User@Example.COM ", STRONG_PASSWORD, "Test User")
        .await
        .unwrap();
    assert_eq!(user.email, "user@example.com");

    // Login with a differently-cased email still resolves.
    let result = h
        .manager
        .login("USER@example.com", STRONG_PASSWORD, Some("cli/1.0"), None)
        .await
        .unwrap();
    assert_eq!(result.user.id, user.id);

    let claims = h
        .verifier
        .verify(&result.access.token, TokenType::Access)
        .await
        .unwrap();
    assert_eq!(claims.sub, user.id);

    h.verifier
        .verify(&result.refresh.token, TokenType::Refresh)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_weak_passwords() {
    let h = setup();

    h.manager
        .register("a@example.com", STRONG_PASSWORD, "A")
        .await
        .unwrap();

    let err = h
        .manager
        .register("a@example.com", OTHER_STRONG_PASSWORD, "A again")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let err = h
        .manager
        .register("b@example.com", "Password1!", "B")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = h.manager.register("not-an-email", STRONG_PASSWORD, "C").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_login_failures_do_not_reveal_which_part_was_wrong() {
    let h = setup();
    h.manager
        .register("a@example.com", STRONG_PASSWORD, "A")
        .await
        .unwrap();

    let unknown = h
        .manager
        .login("nobody@example.com", STRONG_PASSWORD, None, None)
        .await
        .unwrap_err();
    let wrong = h
        .manager
        .login("a@example.com", "wrong-password", None, None)
        .await
        .unwrap_err();

    assert_eq!(unknown.kind, ErrorKind::Authentication);
    assert_eq!(unknown.message, wrong.message);
}

#[tokio::test]
async fn test_inactive_account_cannot_login() {
    let h = setup();
    let user = h
        .manager
        .register("a@example.com", STRONG_PASSWORD, "A")
        .await
        .unwrap();

    h.users
        .set_status(user.id, UserStatus::Inactive)
        .await
        .unwrap();

    let err = h
        .manager
        .login("a@example.com", STRONG_PASSWORD, None, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_lockout_after_repeated_failures() {
    let h = setup();
    h.manager
        .register("a@example.com", STRONG_PASSWORD, "A")
        .await
        .unwrap();

    for _ in 0..3 {
        h.manager
            .login("a@example.com", "wrong-password", None, None)
            .await
            .unwrap_err();
    }

    // Correct password no longer helps while locked.
    let err = h
        .manager
        .login("a@example.com", STRONG_PASSWORD, None, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert!(err.message.contains("locked"));
}

#[tokio::test]
async fn test_failure_counter_resets_on_success() {
    let h = setup();
    h.manager
        .register("a@example.com", STRONG_PASSWORD, "A")
        .await
        .unwrap();

    // Two failures, then a success, then two more failures: the
    // threshold of three is never reached in a row.
    for _ in 0..2 {
        h.manager
            .login("a@example.com", "wrong-password", None, None)
            .await
            .unwrap_err();
    }
    h.manager
        .login("a@example.com", STRONG_PASSWORD, None, None)
        .await
        .unwrap();
    for _ in 0..2 {
        h.manager
            .login("a@example.com", "wrong-password", None, None)
            .await
            .unwrap_err();
    }

    h.manager
        .login("a@example.com", STRONG_PASSWORD, None, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_refresh_and_logout() {
    let h = setup();
    h.manager
        .register("a@example.com", STRONG_PASSWORD, "A")
        .await
        .unwrap();
    let login = h
        .manager
        .login("a@example.com", STRONG_PASSWORD, None, None)
        .await
        .unwrap();

    let access = h.manager.refresh(&login.refresh.token).await.unwrap();
    h.verifier
        .verify(&access.token, TokenType::Access)
        .await
        .unwrap();

    h.manager.logout(&login.refresh.token).await.unwrap();

    let err = h.manager.refresh(&login.refresh.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}

#[tokio::test]
async fn test_change_password_revokes_all_sessions() {
    let h = setup();
    let user = h
        .manager
        .register("a@example.com", STRONG_PASSWORD, "A")
        .await
        .unwrap();
    let first = h
        .manager
        .login("a@example.com", STRONG_PASSWORD, None, None)
        .await
        .unwrap();
    let second = h
        .manager
        .login("a@example.com", STRONG_PASSWORD, None, None)
        .await
        .unwrap();

    // Wrong current password is rejected before anything changes.
    let err = h
        .manager
        .change_password(user.id, "wrong-password", OTHER_STRONG_PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);

    h.manager
        .change_password(user.id, STRONG_PASSWORD, OTHER_STRONG_PASSWORD)
        .await
        .unwrap();

    // Both refresh tokens are dead.
    h.manager.refresh(&first.refresh.token).await.unwrap_err();
    h.manager.refresh(&second.refresh.token).await.unwrap_err();

    // Old password no longer works, new one does.
    h.manager
        .login("a@example.com", STRONG_PASSWORD, None, None)
        .await
        .unwrap_err();
    h.manager
        .login("a@example.com", OTHER_STRONG_PASSWORD, None, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_logout_all_counts_revoked_sessions() {
    let h = setup();
    let user = h
        .manager
        .register("a@example.com", STRONG_PASSWORD, "A")
        .await
        .unwrap();
    h.manager
        .login("a@example.com", STRONG_PASSWORD, None, None)
        .await
        .unwrap();
    h.manager
        .login("a@example.com", STRONG_PASSWORD, None, None)
        .await
        .unwrap();

    assert_eq!(h.manager.logout_all(user.id).await.unwrap(), 2);
    assert_eq!(h.manager.logout_all(user.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_cleanup_purges_expired_sessions() {
    let h = setup();
    let now = Utc::now();

    let expired = Session {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        token_hash: "stale".to_string(),
        created_at: now - Duration::days(31),
        expires_at: now - Duration::days(1),
        is_active: true,
        revoked_at: None,
        revoked_by: None,
        user_agent: None,
        ip_address: None,
    };
    h.sessions.insert(&expired).await.unwrap();

    let cleanup = SessionCleanup::new(h.sessions.clone());
    assert_eq!(cleanup.run_cleanup().await.unwrap(), 1);
    assert_eq!(cleanup.run_cleanup().await.unwrap(), 0);
}
