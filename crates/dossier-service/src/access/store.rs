//! Postgres-backed repositories.

use std::sync::Arc;

use async_trait::async_trait;
use dossier_core::types::{DossierId, GuestId, UserId};
use dossier_db::db::DbProvider;
use dossier_db::db::query::{audit, dossier, guest_token};
use dossier_db::model::audit::NewAccessAuditEntry;
use dossier_db::model::guest_token::GuestToken;

use crate::error::ServiceResult;

use super::ports::{
    AuditRepository, DenialRecord, DossierAccessRepository, GuestTokenRecord,
    GuestTokenRepository,
};

/// Implements every repository port over a [`DbProvider`].
#[derive(Clone)]
pub struct PgAccessStore {
    provider: Arc<dyn DbProvider>,
}

impl PgAccessStore {
    #[must_use]
    pub fn new(provider: Arc<dyn DbProvider>) -> Self {
        Self { provider }
    }
}

impl From<GuestToken> for GuestTokenRecord {
    fn from(token: GuestToken) -> Self {
        Self {
            id: GuestId(token.id),
            dossier_id: DossierId(token.dossier_id),
            email: token.email,
            rights: token.rights,
            last_access_at: token.last_access_at,
        }
    }
}

#[async_trait]
impl DossierAccessRepository for PgAccessStore {
    async fn is_owner(&self, dossier_id: DossierId, user_id: UserId) -> ServiceResult<bool> {
        let mut conn = self.provider.get_connection().await?;
        Ok(dossier::is_owner(&mut conn, dossier_id.get(), user_id.get()).await?)
    }

    async fn has_shared_access(
        &self,
        dossier_id: DossierId,
        user_id: UserId,
    ) -> ServiceResult<bool> {
        let mut conn = self.provider.get_connection().await?;
        Ok(dossier::has_shared_access(&mut conn, dossier_id.get(), user_id.get()).await?)
    }
}

#[async_trait]
impl GuestTokenRepository for PgAccessStore {
    async fn find_by_token(&self, token: &str) -> ServiceResult<Option<GuestTokenRecord>> {
        let mut conn = self.provider.get_connection().await?;
        let record = guest_token::find_by_token(&mut conn, token).await?;
        Ok(record.map(GuestTokenRecord::from))
    }

    async fn touch_last_access(&self, guest_id: GuestId) -> ServiceResult<()> {
        let mut conn = self.provider.get_connection().await?;
        guest_token::touch_last_access(&mut conn, guest_id.get()).await?;
        Ok(())
    }
}

#[async_trait]
impl AuditRepository for PgAccessStore {
    async fn record_denial(&self, record: &DenialRecord<'_>) -> ServiceResult<()> {
        let entry = NewAccessAuditEntry {
            id: uuid::Uuid::now_v7(),
            dossier_id: record.dossier_id.get(),
            client_ip: record.client_ip,
            user_agent: record.user_agent,
            reason: record.reason.code(),
            extra: record.extra.cloned(),
        };

        let mut conn = self.provider.get_connection().await?;
        audit::insert_denial(&mut conn, &entry).await?;
        Ok(())
    }
}
