//! Best-effort audit trail of denied access.

use std::sync::Arc;

use dossier_core::types::DossierId;

use super::ports::{AuditRepository, DenialRecord};
use super::{Credentials, Denial};

pub struct AccessAuditLogger {
    repo: Arc<dyn AuditRepository>,
}

impl AccessAuditLogger {
    #[must_use]
    pub fn new(repo: Arc<dyn AuditRepository>) -> Self {
        Self { repo }
    }

    /// ## Summary
    /// Records a denial for forensic review.
    ///
    /// Never fails: a repository error is reported through `tracing` and
    /// dropped, so the caller still answers with the intended 401/403.
    pub async fn log_denied(&self, dossier_id: DossierId, credentials: &Credentials, denial: &Denial) {
        tracing::warn!(
            dossier_id = %dossier_id,
            reason = %denial.reason(),
            status = denial.status_code().as_u16(),
            client_ip = %credentials.client_ip,
            user_agent = %credentials.user_agent,
            "Dossier access denied"
        );

        let record = DenialRecord {
            dossier_id,
            client_ip: &credentials.client_ip,
            user_agent: &credentials.user_agent,
            reason: denial.reason(),
            extra: denial.extra(),
        };

        if let Err(e) = self.repo.record_denial(&record).await {
            tracing::error!(
                dossier_id = %dossier_id,
                reason = %denial.reason(),
                error = %e,
                "Failed to write access audit entry"
            );
        }
    }
}
