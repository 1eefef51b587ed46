//! The positive outcome of access resolution.

use dossier_core::types::{DossierId, GuestId, UserId};
use serde::{Serialize, Serializer};

use crate::error::{ServiceError, ServiceResult};

use super::permission::{PermissionSet, PrincipalType, permissions_for};
use super::Permission;

/// The party a context was granted to.
///
/// Owners and shared users carry a user id, guests carry a guest id and
/// e-mail; the enum makes it impossible to hold both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Owner { user_id: UserId },
    Shared { user_id: UserId },
    Guest { guest_id: GuestId, email: String },
}

impl Principal {
    #[must_use]
    pub const fn principal_type(&self) -> PrincipalType {
        match self {
            Self::Owner { .. } => PrincipalType::Owner,
            Self::Shared { .. } => PrincipalType::Shared,
            Self::Guest { .. } => PrincipalType::Guest,
        }
    }
}

/// A granted access decision for one dossier.
///
/// Permissions are derived at construction time and cannot be changed
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    principal: Principal,
    permissions: PermissionSet,
    dossier_id: DossierId,
}

impl AccessContext {
    #[must_use]
    pub fn owner(dossier_id: DossierId, user_id: UserId) -> Self {
        Self {
            principal: Principal::Owner { user_id },
            permissions: permissions_for(PrincipalType::Owner, None),
            dossier_id,
        }
    }

    #[must_use]
    pub fn shared(dossier_id: DossierId, user_id: UserId) -> Self {
        Self {
            principal: Principal::Shared { user_id },
            permissions: permissions_for(PrincipalType::Shared, None),
            dossier_id,
        }
    }

    /// Builds a guest context. Callers must have checked the token binding
    /// against `dossier_id` already.
    #[must_use]
    pub fn guest(dossier_id: DossierId, guest_id: GuestId, email: String, rights: &str) -> Self {
        Self {
            principal: Principal::Guest { guest_id, email },
            permissions: permissions_for(PrincipalType::Guest, Some(rights)),
            dossier_id,
        }
    }

    #[must_use]
    pub const fn principal(&self) -> &Principal {
        &self.principal
    }

    #[must_use]
    pub const fn principal_type(&self) -> PrincipalType {
        self.principal.principal_type()
    }

    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        match &self.principal {
            Principal::Owner { user_id } | Principal::Shared { user_id } => Some(*user_id),
            Principal::Guest { .. } => None,
        }
    }

    #[must_use]
    pub const fn guest_id(&self) -> Option<GuestId> {
        match &self.principal {
            Principal::Guest { guest_id, .. } => Some(*guest_id),
            Principal::Owner { .. } | Principal::Shared { .. } => None,
        }
    }

    #[must_use]
    pub fn guest_email(&self) -> Option<&str> {
        match &self.principal {
            Principal::Guest { email, .. } => Some(email.as_str()),
            Principal::Owner { .. } | Principal::Shared { .. } => None,
        }
    }

    #[must_use]
    pub const fn permissions(&self) -> PermissionSet {
        self.permissions
    }

    #[must_use]
    pub const fn dossier_id(&self) -> DossierId {
        self.dossier_id
    }

    #[must_use]
    pub const fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(permission)
    }

    /// ## Summary
    /// Fails unless the context holds `permission`.
    ///
    /// ## Errors
    /// Returns `MissingPermission` if the permission is absent.
    pub fn require_permission(&self, permission: Permission) -> ServiceResult<()> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            tracing::debug!(
                dossier_id = %self.dossier_id,
                principal_type = %self.principal_type(),
                permission = %permission,
                "Permission check failed"
            );
            Err(ServiceError::MissingPermission(permission))
        }
    }
}

#[derive(Serialize)]
struct AccessContextBody<'a> {
    principal_type: PrincipalType,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    guest_id: Option<GuestId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    guest_email: Option<&'a str>,
    permissions: PermissionSet,
    dossier_id: DossierId,
}

impl Serialize for AccessContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        AccessContextBody {
            principal_type: self.principal_type(),
            user_id: self.user_id(),
            guest_id: self.guest_id(),
            guest_email: self.guest_email(),
            permissions: self.permissions,
            dossier_id: self.dossier_id,
        }
        .serialize(serializer)
    }
}
