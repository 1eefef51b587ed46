//! In-memory collaborators for tests.
//!
//! Compiled only for this crate's tests and behind the `test-support` feature.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use dossier_core::types::{DossierId, GuestId, UserId};

use crate::error::{ServiceError, ServiceResult};

use super::DenialReason;
use super::ports::{
    AuditRepository, AuthenticationService, DenialRecord, DossierAccessRepository,
    GuestTokenRecord, GuestTokenRepository,
};

/// An audit entry captured by [`InMemoryAccessStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDenial {
    pub dossier_id: DossierId,
    pub client_ip: String,
    pub user_agent: String,
    pub reason: DenialReason,
    pub extra: Option<serde_json::Value>,
}

#[derive(Default)]
struct State {
    owners: HashMap<DossierId, UserId>,
    shares: HashSet<(DossierId, UserId)>,
    guest_tokens: HashMap<String, GuestTokenRecord>,
    next_guest_id: i32,
    touched: Vec<GuestId>,
    audit: Vec<RecordedDenial>,
}

/// Implements every repository port over a single locked map.
///
/// Failure switches let tests drive the infrastructure-error paths.
#[derive(Default)]
pub struct InMemoryAccessStore {
    state: Mutex<State>,
    fail_lookups: AtomicBool,
    fail_touches: AtomicBool,
    fail_audit_writes: AtomicBool,
}

impl InMemoryAccessStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert_dossier(&self, dossier_id: DossierId, owner: UserId) {
        self.state().owners.insert(dossier_id, owner);
    }

    pub fn insert_share(&self, dossier_id: DossierId, user_id: UserId) {
        self.state().shares.insert((dossier_id, user_id));
    }

    /// Stores a guest token and returns its id. Ids are assigned from 1.
    pub fn insert_guest_token(
        &self,
        token: &str,
        dossier_id: DossierId,
        email: &str,
        rights: &str,
    ) -> GuestId {
        let mut state = self.state();
        state.next_guest_id += 1;
        let id = GuestId(state.next_guest_id);
        state.guest_tokens.insert(
            token.to_ascii_lowercase(),
            GuestTokenRecord {
                id,
                dossier_id,
                email: email.to_string(),
                rights: rights.to_string(),
                last_access_at: None,
            },
        );
        id
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn fail_touches(&self, fail: bool) {
        self.fail_touches.store(fail, Ordering::SeqCst);
    }

    pub fn fail_audit_writes(&self, fail: bool) {
        self.fail_audit_writes.store(fail, Ordering::SeqCst);
    }

    /// Guest ids whose last access was touched, in call order.
    #[must_use]
    pub fn touched(&self) -> Vec<GuestId> {
        self.state().touched.clone()
    }

    #[must_use]
    pub fn audit_entries(&self) -> Vec<RecordedDenial> {
        self.state().audit.clone()
    }

    fn check(flag: &AtomicBool, what: &str) -> ServiceResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(ServiceError::StorageError(format!("{what} unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl DossierAccessRepository for InMemoryAccessStore {
    async fn is_owner(&self, dossier_id: DossierId, user_id: UserId) -> ServiceResult<bool> {
        Self::check(&self.fail_lookups, "dossier lookup")?;
        Ok(self.state().owners.get(&dossier_id) == Some(&user_id))
    }

    async fn has_shared_access(
        &self,
        dossier_id: DossierId,
        user_id: UserId,
    ) -> ServiceResult<bool> {
        Self::check(&self.fail_lookups, "share lookup")?;
        Ok(self.state().shares.contains(&(dossier_id, user_id)))
    }
}

#[async_trait]
impl GuestTokenRepository for InMemoryAccessStore {
    async fn find_by_token(&self, token: &str) -> ServiceResult<Option<GuestTokenRecord>> {
        Self::check(&self.fail_lookups, "guest token lookup")?;
        Ok(self
            .state()
            .guest_tokens
            .get(&token.to_ascii_lowercase())
            .cloned())
    }

    async fn touch_last_access(&self, guest_id: GuestId) -> ServiceResult<()> {
        Self::check(&self.fail_touches, "guest token update")?;
        let mut state = self.state();
        let now = chrono::Utc::now();
        if let Some(record) = state.guest_tokens.values_mut().find(|r| r.id == guest_id) {
            record.last_access_at = Some(now);
        }
        state.touched.push(guest_id);
        Ok(())
    }
}

#[async_trait]
impl AuditRepository for InMemoryAccessStore {
    async fn record_denial(&self, record: &DenialRecord<'_>) -> ServiceResult<()> {
        Self::check(&self.fail_audit_writes, "audit log")?;
        self.state().audit.push(RecordedDenial {
            dossier_id: record.dossier_id,
            client_ip: record.client_ip.to_string(),
            user_agent: record.user_agent.to_string(),
            reason: record.reason,
            extra: record.extra.cloned(),
        });
        Ok(())
    }
}

/// Bearer-token verifier backed by a fixed token table.
#[derive(Debug, Default, Clone)]
pub struct StaticAuthenticationService {
    tokens: HashMap<String, UserId>,
    unavailable: bool,
}

impl StaticAuthenticationService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A verifier that fails every call as if the service were down.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, user_id: UserId) -> Self {
        self.tokens.insert(token.into(), user_id);
        self
    }
}

#[async_trait]
impl AuthenticationService for StaticAuthenticationService {
    async fn verify(&self, bearer_token: &str) -> ServiceResult<Option<UserId>> {
        if self.unavailable {
            return Err(ServiceError::AuthenticationUnavailable(
                "static authentication service marked unavailable".to_string(),
            ));
        }
        Ok(self.tokens.get(bearer_token).copied())
    }
}
