use thiserror::Error;

use crate::access::Permission;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] dossier_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] dossier_core::error::CoreError),

    /// The external authentication service could not be reached or answered
    /// outside its contract. Distinct from a rejected token.
    #[error("Authentication service unavailable: {0}")]
    AuthenticationUnavailable(String),

    #[error("Missing permission: {0}")]
    MissingPermission(Permission),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ServiceError {
    /// Stable code for errors that belong to the access-control taxonomy.
    #[must_use]
    pub const fn reason_code(&self) -> Option<&'static str> {
        match self {
            Self::MissingPermission(_) => Some(crate::access::MISSING_PERMISSION_CODE),
            _ => None,
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
