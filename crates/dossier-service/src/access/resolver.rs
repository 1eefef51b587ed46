//! Orchestrates the strategies into a single access decision.

use std::sync::Arc;

use dossier_core::config::AccessConfig;
use dossier_core::types::DossierId;

use crate::error::{ServiceError, ServiceResult};

use super::audit::AccessAuditLogger;
use super::credentials::extract_credentials;
use super::guest::GuestTokenStrategy;
use super::owner_shared::UserAccessStrategy;
use super::ports::{
    AuditRepository, AuthenticationService, DossierAccessRepository, GuestTokenRepository,
};
use super::strategy::{AuthStrategy, StrategyOutcome};
use super::{AccessDecision, Credentials, Denial, DenialReason};

/// Resolves who is asking for a dossier and what they may do.
///
/// Strategies run in order; the first `Matched` outcome is final. When every
/// strategy is `NotApplicable` the request is denied with
/// `no_valid_credentials`. Every denial is audited exactly once.
///
/// ## Usage
///
/// ```ignore
/// let resolver = AccessResolver::new(authn, store.clone(), store.clone(), store);
/// match resolver.resolve_access(req, dossier_id).await? {
///     Ok(ctx) => ctx.require_permission(Permission::View)?,
///     Err(denial) => return render(denial),
/// }
/// ```
pub struct AccessResolver {
    strategies: Vec<Arc<dyn AuthStrategy>>,
    audit: AccessAuditLogger,
    sources: AccessConfig,
}

impl AccessResolver {
    /// Builds the standard resolver: bearer token first, then guest token.
    #[must_use]
    pub fn new(
        authn: Arc<dyn AuthenticationService>,
        dossiers: Arc<dyn DossierAccessRepository>,
        guest_tokens: Arc<dyn GuestTokenRepository>,
        audit: Arc<dyn AuditRepository>,
    ) -> Self {
        Self::with_strategies(
            vec![
                Arc::new(UserAccessStrategy::new(authn, dossiers)),
                Arc::new(GuestTokenStrategy::new(guest_tokens)),
            ],
            AccessAuditLogger::new(audit),
        )
    }

    #[must_use]
    pub fn with_strategies(strategies: Vec<Arc<dyn AuthStrategy>>, audit: AccessAuditLogger) -> Self {
        Self {
            strategies,
            audit,
            sources: AccessConfig::default(),
        }
    }

    /// Sets where guest tokens and client addresses are read from.
    #[must_use]
    pub fn with_credential_sources(mut self, sources: AccessConfig) -> Self {
        self.sources = sources;
        self
    }

    /// Strategy names in the order they are tried.
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// ## Summary
    /// Extracts credentials from `req` and resolves access to `dossier_id`.
    ///
    /// ## Errors
    /// Returns an error on infrastructure failure; denials are `Ok(Err(..))`.
    pub async fn resolve_access(
        &self,
        req: &salvo::Request,
        dossier_id: DossierId,
    ) -> ServiceResult<AccessDecision> {
        let credentials = extract_credentials(req, &self.sources);
        self.resolve(&credentials, dossier_id).await
    }

    /// ## Summary
    /// Resolves already-extracted credentials against `dossier_id`.
    ///
    /// ## Errors
    /// Returns an error on infrastructure failure; denials are `Ok(Err(..))`.
    #[tracing::instrument(skip(self, credentials), fields(
        client_ip = %credentials.client_ip,
        has_bearer = credentials.bearer_token.is_some(),
        has_guest = credentials.guest_token.is_some(),
    ))]
    pub async fn resolve(
        &self,
        credentials: &Credentials,
        dossier_id: DossierId,
    ) -> ServiceResult<AccessDecision> {
        for strategy in &self.strategies {
            match strategy.attempt(credentials, dossier_id).await? {
                StrategyOutcome::NotApplicable => {
                    tracing::trace!(strategy = strategy.name(), "Strategy not applicable");
                }
                StrategyOutcome::Matched(Ok(ctx)) => {
                    if ctx.dossier_id() != dossier_id {
                        return Err(ServiceError::InvariantViolation(
                            "access context resolved for a different dossier",
                        ));
                    }
                    tracing::debug!(
                        strategy = strategy.name(),
                        principal_type = %ctx.principal_type(),
                        permissions = ctx.permissions().len(),
                        "Dossier access granted"
                    );
                    return Ok(Ok(ctx));
                }
                StrategyOutcome::Matched(Err(denial)) => {
                    self.audit.log_denied(dossier_id, credentials, &denial).await;
                    return Ok(Err(denial));
                }
            }
        }

        let denial = Denial::new(DenialReason::NoValidCredentials);
        self.audit.log_denied(dossier_id, credentials, &denial).await;
        Ok(Err(denial))
    }
}
