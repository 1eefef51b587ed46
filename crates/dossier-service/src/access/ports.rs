//! Collaborators the resolver depends on.
//!
//! Each is injected as an `Arc<dyn ..>` so the resolver carries no hidden
//! global state and can run against Postgres or the in-memory store alike.

use async_trait::async_trait;
use dossier_core::types::{DossierId, GuestId, UserId};

use crate::error::ServiceResult;

use super::DenialReason;

/// Verifies bearer tokens. Signature and claim checks live behind this trait.
#[async_trait]
pub trait AuthenticationService: Send + Sync {
    /// Returns the verified user id, or `None` if the token was rejected.
    ///
    /// ## Errors
    /// Returns an error only when the service itself could not answer.
    async fn verify(&self, bearer_token: &str) -> ServiceResult<Option<UserId>>;
}

#[async_trait]
pub trait DossierAccessRepository: Send + Sync {
    async fn is_owner(&self, dossier_id: DossierId, user_id: UserId) -> ServiceResult<bool>;

    async fn has_shared_access(&self, dossier_id: DossierId, user_id: UserId)
    -> ServiceResult<bool>;
}

/// A guest invitation as seen by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestTokenRecord {
    pub id: GuestId,
    pub dossier_id: DossierId,
    pub email: String,
    pub rights: String,
    pub last_access_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[async_trait]
pub trait GuestTokenRepository: Send + Sync {
    async fn find_by_token(&self, token: &str) -> ServiceResult<Option<GuestTokenRecord>>;

    async fn touch_last_access(&self, guest_id: GuestId) -> ServiceResult<()>;
}

/// One denied access attempt.
#[derive(Debug, Clone, Copy)]
pub struct DenialRecord<'a> {
    pub dossier_id: DossierId,
    pub client_ip: &'a str,
    pub user_agent: &'a str,
    pub reason: DenialReason,
    pub extra: Option<&'a serde_json::Value>,
}

#[async_trait]
pub trait AuditRepository: Send + Sync {
    async fn record_denial(&self, record: &DenialRecord<'_>) -> ServiceResult<()>;
}
