use salvo::http::StatusCode;
use salvo::writing::Json;
use serde::Serialize;
use thiserror::Error;

use dossier_service::error::ServiceError;

/// Message rendered for a missing permission.
pub const MISSING_PERMISSION_MESSAGE: &str = "Onvoldoende rechten voor deze actie";
/// Message rendered for any infrastructure failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Interne serverfout";

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] dossier_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] dossier_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// The JSON error envelope shared by every non-denial failure.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: &'static str,
}

impl ErrorResponse {
    #[must_use]
    pub const fn new(error: &'static str) -> Self {
        Self {
            success: false,
            error,
        }
    }
}

impl AppError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(ServiceError::MissingPermission(_)) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub const fn client_message(&self) -> &'static str {
        match self {
            Self::ServiceError(ServiceError::MissingPermission(_)) => MISSING_PERMISSION_MESSAGE,
            _ => INTERNAL_ERROR_MESSAGE,
        }
    }

    /// Writes status and body to `res`. Internal detail stays in the logs.
    pub fn render(&self, res: &mut salvo::Response) {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            let reason = match self {
                Self::ServiceError(e) => e.reason_code(),
                _ => None,
            };
            tracing::debug!(error = %self, reason = reason.unwrap_or_default(), "Request refused");
        }
        res.status_code(self.status_code());
        res.render(Json(ErrorResponse::new(self.client_message())));
    }
}
