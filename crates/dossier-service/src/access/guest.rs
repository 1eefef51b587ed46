//! Guest-token strategy.
//!
//! A guest token is a 64-character hex string handed out by the invitation
//! flow. It is bound to exactly one dossier; presenting it for any other
//! dossier is a denial, never a reduced grant.

use std::sync::Arc;

use async_trait::async_trait;
use dossier_core::types::DossierId;

use crate::error::ServiceResult;

use super::ports::GuestTokenRepository;
use super::strategy::{AuthStrategy, StrategyOutcome};
use super::{AccessContext, AccessDecision, Credentials, Denial, DenialReason};

pub const GUEST_TOKEN_LEN: usize = 64;

/// ## Summary
/// Checks that a guest token is exactly 64 hexadecimal characters, in either case.
#[must_use]
pub fn is_valid_guest_token_format(token: &str) -> bool {
    token.len() == GUEST_TOKEN_LEN && token.bytes().all(|b| b.is_ascii_hexdigit())
}

pub struct GuestTokenStrategy {
    tokens: Arc<dyn GuestTokenRepository>,
}

impl GuestTokenStrategy {
    #[must_use]
    pub fn new(tokens: Arc<dyn GuestTokenRepository>) -> Self {
        Self { tokens }
    }

    /// ## Summary
    /// Validates `guest_token` and binds it to `dossier_id`.
    ///
    /// ## Side Effects
    /// Touches the token's `last_access_at` on success. A failed touch is
    /// logged and does not affect the decision.
    ///
    /// ## Errors
    /// Returns an error if the token lookup fails.
    #[tracing::instrument(skip(self, guest_token))]
    pub async fn resolve(
        &self,
        guest_token: &str,
        dossier_id: DossierId,
    ) -> ServiceResult<AccessDecision> {
        if !is_valid_guest_token_format(guest_token) {
            return Ok(Err(Denial::new(DenialReason::InvalidTokenFormat)));
        }

        let Some(record) = self.tokens.find_by_token(guest_token).await? else {
            return Ok(Err(Denial::new(DenialReason::InvalidOrExpiredGuestToken)));
        };

        if record.dossier_id != dossier_id {
            return Ok(Err(Denial::new(DenialReason::GuestTokenDossierMismatch)
                .with_extra(serde_json::json!({
                    "guest_id": record.id,
                    "token_dossier_id": record.dossier_id,
                    "requested_dossier_id": dossier_id,
                }))));
        }

        if let Err(e) = self.tokens.touch_last_access(record.id).await {
            tracing::warn!(guest_id = %record.id, error = %e, "Failed to touch guest token last access");
        }

        Ok(Ok(AccessContext::guest(
            dossier_id,
            record.id,
            record.email,
            &record.rights,
        )))
    }
}

#[async_trait]
impl AuthStrategy for GuestTokenStrategy {
    fn name(&self) -> &'static str {
        "guest_token"
    }

    async fn attempt(
        &self,
        credentials: &Credentials,
        dossier_id: DossierId,
    ) -> ServiceResult<StrategyOutcome> {
        match credentials.guest_token.as_deref() {
            Some(token) => Ok(StrategyOutcome::Matched(
                self.resolve(token, dossier_id).await?,
            )),
            None => Ok(StrategyOutcome::NotApplicable),
        }
    }
}
