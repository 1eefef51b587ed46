//! Bearer-token strategy: owner or shared user.

use std::sync::Arc;

use async_trait::async_trait;
use dossier_core::types::{DossierId, UserId};

use crate::error::ServiceResult;

use super::ports::{AuthenticationService, DossierAccessRepository};
use super::strategy::{AuthStrategy, StrategyOutcome};
use super::{AccessContext, Credentials};

/// What a verified user is to a dossier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAccess {
    Owner(UserId),
    Shared(UserId),
    NotApplicable,
}

impl UserAccess {
    #[must_use]
    pub fn into_context(self, dossier_id: DossierId) -> Option<AccessContext> {
        match self {
            Self::Owner(user_id) => Some(AccessContext::owner(dossier_id, user_id)),
            Self::Shared(user_id) => Some(AccessContext::shared(dossier_id, user_id)),
            Self::NotApplicable => None,
        }
    }
}

pub struct UserAccessStrategy {
    authn: Arc<dyn AuthenticationService>,
    dossiers: Arc<dyn DossierAccessRepository>,
}

impl UserAccessStrategy {
    #[must_use]
    pub fn new(
        authn: Arc<dyn AuthenticationService>,
        dossiers: Arc<dyn DossierAccessRepository>,
    ) -> Self {
        Self { authn, dossiers }
    }

    /// ## Summary
    /// Resolves a bearer token into owner or shared status for `dossier_id`.
    ///
    /// A missing token, a rejected token, or a verified user with no relation
    /// to the dossier are all `NotApplicable`, so the guest path still runs.
    ///
    /// ## Errors
    /// Returns an error if the authentication service or repository fails.
    #[tracing::instrument(skip(self, bearer_token), fields(has_bearer = bearer_token.is_some()))]
    pub async fn resolve(
        &self,
        bearer_token: Option<&str>,
        dossier_id: DossierId,
    ) -> ServiceResult<UserAccess> {
        let Some(token) = bearer_token else {
            return Ok(UserAccess::NotApplicable);
        };

        let Some(user_id) = self.authn.verify(token).await? else {
            tracing::debug!("Bearer token not verified");
            return Ok(UserAccess::NotApplicable);
        };

        if self.dossiers.is_owner(dossier_id, user_id).await? {
            return Ok(UserAccess::Owner(user_id));
        }

        if self.dossiers.has_shared_access(dossier_id, user_id).await? {
            return Ok(UserAccess::Shared(user_id));
        }

        tracing::debug!(user_id = %user_id, "Authenticated user has no relation to dossier");
        Ok(UserAccess::NotApplicable)
    }
}

#[async_trait]
impl AuthStrategy for UserAccessStrategy {
    fn name(&self) -> &'static str {
        "owner_shared"
    }

    async fn attempt(
        &self,
        credentials: &Credentials,
        dossier_id: DossierId,
    ) -> ServiceResult<StrategyOutcome> {
        let access = self
            .resolve(credentials.bearer_token.as_deref(), dossier_id)
            .await?;

        Ok(access
            .into_context(dossier_id)
            .map_or(StrategyOutcome::NotApplicable, |ctx| {
                StrategyOutcome::Matched(Ok(ctx))
            }))
    }
}
