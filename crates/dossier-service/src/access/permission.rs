//! Permissions and the principal → permission mapping.
//!
//! The mapping is a pure function of the principal type and, for guests, the
//! rights label stored with the guest token. Nothing about the request itself
//! can influence it.

use serde::{Serialize, Serializer};

/// A single capability on a dossier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Upload,
    Download,
    Delete,
    View,
    Invite,
    Manage,
}

impl Permission {
    /// Every permission, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Upload,
        Self::Download,
        Self::Delete,
        Self::View,
        Self::Invite,
        Self::Manage,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Download => "download",
            Self::Delete => "delete",
            Self::View => "view",
            Self::Invite => "invite",
            Self::Manage => "manage",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Upload => 1,
            Self::Download => 1 << 1,
            Self::Delete => 1 << 2,
            Self::View => 1 << 3,
            Self::Invite => 1 << 4,
            Self::Manage => 1 << 5,
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of [`Permission`]s.
///
/// Iteration and serialization follow [`Permission::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PermissionSet(u8);

impl PermissionSet {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn all() -> Self {
        Self::from_slice(&Permission::ALL)
    }

    #[must_use]
    pub const fn from_slice(permissions: &[Permission]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < permissions.len() {
            bits |= permissions[i].bit();
            i += 1;
        }
        Self(bits)
    }

    #[must_use]
    pub const fn contains(self, permission: Permission) -> bool {
        self.0 & permission.bit() != 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Permission> {
        Permission::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().fold(0, |bits, p| bits | p.bit()))
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Who a granted context belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalType {
    Owner,
    Shared,
    Guest,
}

impl PrincipalType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Shared => "shared",
            Self::Guest => "guest",
        }
    }
}

impl std::fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse guest capability label stored on a guest token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuestRights {
    Upload,
    View,
    UploadView,
}

impl GuestRights {
    /// Parses a stored rights label. Unrecognised labels yield `None`.
    #[must_use]
    pub fn parse(rights: &str) -> Option<Self> {
        match rights {
            "upload" => Some(Self::Upload),
            "view" => Some(Self::View),
            "upload_view" => Some(Self::UploadView),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::View => "view",
            Self::UploadView => "upload_view",
        }
    }

    /// Viewing a dossier includes retrieving its documents, so every label
    /// containing `view` also carries `download`.
    #[must_use]
    pub const fn permissions(self) -> PermissionSet {
        match self {
            Self::Upload => PermissionSet::from_slice(&[Permission::Upload]),
            Self::View => PermissionSet::from_slice(&[Permission::View, Permission::Download]),
            Self::UploadView => PermissionSet::from_slice(&[
                Permission::Upload,
                Permission::View,
                Permission::Download,
            ]),
        }
    }
}

pub const OWNER_PERMISSIONS: PermissionSet = PermissionSet::all();

pub const SHARED_PERMISSIONS: PermissionSet = PermissionSet::from_slice(&[
    Permission::Upload,
    Permission::Download,
    Permission::Delete,
    Permission::View,
]);

/// ## Summary
/// Maps a principal type (and, for guests, the rights label) to its permission set.
///
/// `rights` is ignored for owners and shared users. A guest with missing or
/// unrecognised rights gets the empty set.
#[must_use]
pub fn permissions_for(principal_type: PrincipalType, rights: Option<&str>) -> PermissionSet {
    match principal_type {
        PrincipalType::Owner => OWNER_PERMISSIONS,
        PrincipalType::Shared => SHARED_PERMISSIONS,
        PrincipalType::Guest => rights
            .and_then(GuestRights::parse)
            .map_or_else(PermissionSet::empty, GuestRights::permissions),
    }
}
