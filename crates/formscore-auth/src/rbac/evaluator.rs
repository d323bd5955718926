//! Permission evaluation and grant management.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use formscore_core::error::AppError;
use formscore_core::types::Scope;
use formscore_entity::{GrantPermission, Grantor, PermissionGrant, PermissionLevel};
use formscore_store::{PermissionFilter, PermissionStore};

/// Evaluates scoped permission checks and manages grants.
///
/// Evaluation fetches the user's full grant set and filters in memory;
/// no scope filter is pushed to the store.
#[derive(Clone)]
pub struct RbacEvaluator {
    permissions: Arc<dyn PermissionStore>,
}

impl std::fmt::Debug for RbacEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RbacEvaluator").finish()
    }
}

/// Whether a grant's scope covers a requested scope.
///
/// A grant scoped to every company but one category covers nothing; the
/// remaining combinations defer to the per-field dominance rules.
fn scope_matches(grant: &PermissionGrant, company: &Scope, category: &Scope) -> bool {
    match (&grant.company, &grant.category) {
        (Scope::Any, Scope::Specific(_)) => false,
        (grant_company, grant_category) => {
            grant_company.satisfies(company) && grant_category.satisfies(category)
        }
    }
}

impl RbacEvaluator {
    pub fn new(permissions: Arc<dyn PermissionStore>) -> Self {
        Self { permissions }
    }

    /// Checks whether a user holds an effective grant at or above the
    /// required level whose scope covers the requested scope.
    ///
    /// Fails closed: any store or evaluation error yields `false`.
    pub async fn check_permission(
        &self,
        user_id: Uuid,
        required_level: PermissionLevel,
        company: &Scope,
        category: &Scope,
    ) -> bool {
        match self.evaluate(user_id, required_level, company, category).await {
            Ok(allowed) => allowed,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Permission check failed, denying");
                false
            }
        }
    }

    async fn evaluate(
        &self,
        user_id: Uuid,
        required_level: PermissionLevel,
        company: &Scope,
        category: &Scope,
    ) -> Result<bool, AppError> {
        let grants = self.permissions.find_by_user(user_id).await?;
        let now = Utc::now();

        Ok(grants.iter().any(|grant| {
            grant.is_effective_at(now)
                && grant.level.has_at_least(required_level)
                && scope_matches(grant, company, category)
        }))
    }

    /// Whether the user holds an effective super-admin grant.
    pub async fn is_super_admin(&self, user_id: Uuid) -> bool {
        self.check_permission(user_id, PermissionLevel::Admin, &Scope::Any, &Scope::Any)
            .await
    }

    /// Raw grant listing for a user, newest first, not filtered for
    /// effectiveness. `None` leaves a field unconstrained. The scope
    /// filters are null-inclusive: querying a specific company or
    /// category also returns the wildcard grants that cover it. The
    /// level filter is exact.
    pub async fn get_user_permissions(
        &self,
        user_id: Uuid,
        company: Option<&Scope>,
        category: Option<&Scope>,
        level: Option<PermissionLevel>,
    ) -> Result<Vec<PermissionGrant>, AppError> {
        let grants = self.permissions.find_by_user(user_id).await?;
        Ok(grants
            .into_iter()
            .filter(|grant| {
                company.is_none_or(|c| grant.company.is_any() || &grant.company == c)
                    && category.is_none_or(|c| grant.category.is_any() || &grant.category == c)
                    && level.is_none_or(|l| grant.level == l)
            })
            .collect())
    }

    /// The highest level among the user's effective grants, if any.
    pub async fn get_highest_level(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PermissionLevel>, AppError> {
        let grants = self.permissions.find_by_user(user_id).await?;
        let now = Utc::now();
        Ok(grants
            .iter()
            .filter(|grant| grant.is_effective_at(now))
            .map(|grant| grant.level)
            .max_by_key(|level| level.rank()))
    }

    /// Creates a new grant on behalf of `granted_by`.
    ///
    /// The granter must hold an effective admin grant covering the
    /// scope being granted. An existing effective grant for the exact
    /// `(user, company, category)` triple at any level is a conflict;
    /// levels are never upgraded in place.
    pub async fn grant_permission(
        &self,
        granted_by: Uuid,
        input: GrantPermission,
    ) -> Result<PermissionGrant, AppError> {
        let authorized = self
            .check_permission(
                granted_by,
                PermissionLevel::Admin,
                &input.company,
                &input.category,
            )
            .await;
        if !authorized {
            return Err(AppError::authorization(
                "Granter lacks admin rights over the requested scope",
            ));
        }

        self.insert_grant(Grantor::User(granted_by), input).await
    }

    /// Creates a system-issued super-admin grant, for bootstrap.
    pub async fn grant_bootstrap(&self, user_id: Uuid) -> Result<PermissionGrant, AppError> {
        self.insert_grant(
            Grantor::System,
            GrantPermission {
                user_id,
                company: Scope::Any,
                category: Scope::Any,
                level: PermissionLevel::Admin,
                expires_at: None,
                notes: Some("bootstrap super-admin".to_string()),
            },
        )
        .await
    }

    async fn insert_grant(
        &self,
        granted_by: Grantor,
        input: GrantPermission,
    ) -> Result<PermissionGrant, AppError> {
        let now = Utc::now();
        let existing = self.permissions.find_by_user(input.user_id).await?;
        let duplicate = existing.iter().any(|grant| {
            grant.is_effective_at(now)
                && grant.company == input.company
                && grant.category == input.category
        });
        if duplicate {
            return Err(AppError::conflict(
                "An active grant already exists for this user and scope",
            ));
        }

        let grant = PermissionGrant {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            company: input.company,
            category: input.category,
            level: input.level,
            granted_by,
            granted_at: now,
            expires_at: input.expires_at,
            is_active: true,
            revoked_by: None,
            revoked_at: None,
            notes: input.notes,
        };

        self.permissions.insert(&grant).await?;

        info!(
            grant_id = %grant.id,
            user_id = %grant.user_id,
            level = %grant.level,
            company = %grant.company,
            category = %grant.category,
            "Permission granted"
        );

        Ok(grant)
    }

    /// Revokes a grant, stamping the revoker and appending notes.
    ///
    /// Fails with `NotFound` when the id does not resolve to an active
    /// grant. The revoker's own rights are not re-checked here; the
    /// surrounding handler is expected to have authorized the call.
    pub async fn revoke_permission(
        &self,
        permission_id: Uuid,
        revoked_by: Uuid,
        notes: Option<&str>,
    ) -> Result<(), AppError> {
        let changed = self
            .permissions
            .update_revocation(permission_id, revoked_by, Utc::now(), notes)
            .await?;

        if changed == 0 {
            return Err(AppError::not_found(
                "Permission grant not found or already revoked",
            ));
        }

        info!(grant_id = %permission_id, revoked_by = %revoked_by, "Permission revoked");
        Ok(())
    }

    /// Filtered listing across all users, for admin tooling.
    pub async fn list_permissions(
        &self,
        filter: &PermissionFilter,
    ) -> Result<Vec<PermissionGrant>, AppError> {
        self.permissions.list(filter).await
    }
}
