//! The `AuthStrategy` seam between the resolver and each way of proving access.

use async_trait::async_trait;
use dossier_core::types::DossierId;

use crate::error::ServiceResult;

use super::{AccessDecision, Credentials};

/// Result of one authentication strategy.
#[derive(Debug)]
pub enum StrategyOutcome {
    /// The strategy owns the decision; later strategies are not consulted.
    Matched(AccessDecision),
    /// The strategy has nothing to say about this request.
    NotApplicable,
}

/// A way of proving access to a dossier.
///
/// The resolver tries strategies in order and stops at the first `Matched`.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// ## Errors
    /// Returns an error on infrastructure failure. Denials are `Matched(Err(..))`.
    async fn attempt(
        &self,
        credentials: &Credentials,
        dossier_id: DossierId,
    ) -> ServiceResult<StrategyOutcome>;
}
