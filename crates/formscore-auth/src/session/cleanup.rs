//! Expired session cleanup.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use formscore_core::error::AppError;
use formscore_store::SessionStore;

/// Handles periodic purging of expired session rows.
///
/// Expired sessions already fail verification; cleanup only reclaims
/// storage. Revoked-but-unexpired sessions are kept as audit history
/// until they expire.
#[derive(Clone)]
pub struct SessionCleanup {
    sessions: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionCleanup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCleanup").finish()
    }
}

impl SessionCleanup {
    /// Creates a new session cleanup handler.
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Runs a cleanup cycle, deleting all sessions past their expiry.
    ///
    /// Returns the number of sessions removed.
    pub async fn run_cleanup(&self) -> Result<u64, AppError> {
        let removed = self.sessions.delete_expired(Utc::now()).await?;

        if removed > 0 {
            info!(removed = removed, "Session cleanup completed");
        }

        Ok(removed)
    }
}
