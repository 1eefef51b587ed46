//! The negative outcome of access resolution.

use salvo::http::StatusCode;
use serde::Serialize;

use super::AccessContext;

/// Reason code carried by `ServiceError::MissingPermission` in audit and logs.
pub const MISSING_PERMISSION_CODE: &str = "missing_permission";

/// Why a request was denied at resolution time.
///
/// The codes returned by [`DenialReason::code`] are stable and used to
/// correlate audit entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenialReason {
    /// The guest token is not 64 hexadecimal characters.
    InvalidTokenFormat,
    /// No guest token record matches.
    InvalidOrExpiredGuestToken,
    /// The guest token is bound to a different dossier.
    GuestTokenDossierMismatch,
    /// Neither a bearer token nor a guest token granted anything.
    NoValidCredentials,
}

impl DenialReason {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidTokenFormat => "invalid_token_format",
            Self::InvalidOrExpiredGuestToken => "invalid_or_expired_guest_token",
            Self::GuestTokenDossierMismatch => "guest_token_dossier_mismatch",
            Self::NoValidCredentials => "no_valid_credentials",
        }
    }

    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::GuestTokenDossierMismatch => StatusCode::FORBIDDEN,
            Self::InvalidTokenFormat
            | Self::InvalidOrExpiredGuestToken
            | Self::NoValidCredentials => StatusCode::UNAUTHORIZED,
        }
    }

    /// Message shown to the client.
    #[must_use]
    pub const fn client_message(self) -> &'static str {
        match self {
            Self::InvalidTokenFormat => "Ongeldig gasttoken",
            Self::InvalidOrExpiredGuestToken => "Ongeldige of verlopen gasttoken",
            Self::GuestTokenDossierMismatch => "Geen toegang tot dit dossier",
            Self::NoValidCredentials => "Authenticatie vereist",
        }
    }
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A denial with optional diagnostic data.
///
/// `extra` is written to the audit trail only and never rendered to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Denial {
    reason: DenialReason,
    extra: Option<serde_json::Value>,
}

impl Denial {
    #[must_use]
    pub const fn new(reason: DenialReason) -> Self {
        Self {
            reason,
            extra: None,
        }
    }

    #[must_use]
    pub fn with_extra(mut self, extra: serde_json::Value) -> Self {
        self.extra = Some(extra);
        self
    }

    #[must_use]
    pub const fn reason(&self) -> DenialReason {
        self.reason
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.reason.status_code()
    }

    #[must_use]
    pub const fn extra(&self) -> Option<&serde_json::Value> {
        self.extra.as_ref()
    }

    /// The JSON body sent to the client.
    #[must_use]
    pub const fn body(&self) -> DenialBody {
        DenialBody {
            success: false,
            error: self.reason.client_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenialBody {
    pub success: bool,
    pub error: &'static str,
}

/// Outcome of resolving access: a grant or a denial, never both.
pub type AccessDecision = Result<AccessContext, Denial>;
