//! Bearer-token verification backends.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dossier_core::config::{AuthConfig, AuthMethod};
use dossier_core::types::UserId;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};

use super::ports::AuthenticationService;

const VERIFY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    user_id: Option<i32>,
}

/// Delegates token verification to the identity service.
///
/// The service is called with the bearer token forwarded as-is. A 2xx body
/// carrying `user_id` is a verified user. 401, 403 and a 2xx body without a
/// readable `user_id` are a rejected token. Any other status, or a transport
/// failure, means the service could not answer.
#[derive(Debug, Clone)]
pub struct RemoteAuthenticationService {
    client: reqwest::Client,
    verify_url: String,
}

impl RemoteAuthenticationService {
    /// ## Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(verify_url: impl Into<String>) -> ServiceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(VERIFY_TIMEOUT)
            .build()
            .map_err(|e| ServiceError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            client,
            verify_url: verify_url.into(),
        })
    }
}

#[async_trait]
impl AuthenticationService for RemoteAuthenticationService {
    #[tracing::instrument(skip(self, bearer_token), fields(verify_url = %self.verify_url))]
    async fn verify(&self, bearer_token: &str) -> ServiceResult<Option<UserId>> {
        let response = self
            .client
            .get(&self.verify_url)
            .bearer_auth(bearer_token)
            .send()
            .await
            .map_err(|e| ServiceError::AuthenticationUnavailable(e.to_string()))?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            tracing::debug!(status = status.as_u16(), "Bearer token rejected");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ServiceError::AuthenticationUnavailable(format!(
                "verify endpoint answered {status}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServiceError::AuthenticationUnavailable(e.to_string()))?;

        // An answer we cannot read names no user, so the token is unverified.
        match serde_json::from_slice::<VerifyResponse>(&bytes) {
            Ok(body) => Ok(body.user_id.map(UserId)),
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable verify response, treating token as unverified");
                Ok(None)
            }
        }
    }
}

/// Rejects every bearer token. Only guest tokens can grant access.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAuthenticationService;

#[async_trait]
impl AuthenticationService for DisabledAuthenticationService {
    async fn verify(&self, _bearer_token: &str) -> ServiceResult<Option<UserId>> {
        Ok(None)
    }
}

/// ## Summary
/// Builds the configured authentication backend.
///
/// ## Errors
/// Returns an error if `remote` is selected without a usable `verify_url`.
pub fn authentication_service_from_config(
    config: &AuthConfig,
) -> ServiceResult<Arc<dyn AuthenticationService>> {
    match config.method {
        AuthMethod::Remote => {
            let remote = config.require_remote()?;
            tracing::info!(verify_url = %remote.verify_url, "Using remote authentication service");
            Ok(Arc::new(RemoteAuthenticationService::new(
                remote.verify_url.clone(),
            )?))
        }
        AuthMethod::Disabled => {
            tracing::warn!("Bearer authentication disabled; only guest tokens grant access");
            Ok(Arc::new(DisabledAuthenticationService))
        }
    }
}
