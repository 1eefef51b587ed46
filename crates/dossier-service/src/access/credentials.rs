//! Pulls credentials and client metadata out of a request.
//!
//! Nothing here validates anything; an absent or blank value is simply `None`.

use dossier_core::config::AccessConfig;
use dossier_core::constants::UNKNOWN_CLIENT_VALUE;
use salvo::http::header::{AUTHORIZATION, USER_AGENT};

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";

/// Everything the resolver needs from a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub bearer_token: Option<String>,
    pub guest_token: Option<String>,
    pub client_ip: String,
    pub user_agent: String,
}

impl Credentials {
    /// Credentials with no tokens and unknown client metadata.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            bearer_token: None,
            guest_token: None,
            client_ip: UNKNOWN_CLIENT_VALUE.to_string(),
            user_agent: UNKNOWN_CLIENT_VALUE.to_string(),
        }
    }

    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_guest_token(mut self, token: impl Into<String>) -> Self {
        self.guest_token = Some(token.into());
        self
    }
}

// Tokens are secrets; keep them out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("guest_token", &self.guest_token.as_ref().map(|_| "<redacted>"))
            .field("client_ip", &self.client_ip)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn header_str<'a>(req: &'a salvo::Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// ## Summary
/// Parses an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively.
#[must_use]
pub fn parse_bearer(header_value: &str) -> Option<String> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        non_blank(token)
    } else {
        None
    }
}

fn extract_guest_token(req: &salvo::Request, sources: &AccessConfig) -> Option<String> {
    header_str(req, &sources.guest_token_header)
        .and_then(non_blank)
        .or_else(|| {
            req.query::<String>(&sources.guest_token_query)
                .as_deref()
                .and_then(non_blank)
        })
        .or_else(|| {
            req.cookie(&sources.guest_token_cookie)
                .and_then(|cookie| non_blank(cookie.value()))
        })
}

fn extract_client_ip(req: &salvo::Request, sources: &AccessConfig) -> String {
    let forwarded = if sources.trust_forwarded_for {
        header_str(req, FORWARDED_FOR)
            .and_then(|value| value.split(',').next())
            .and_then(non_blank)
    } else {
        None
    };

    forwarded
        .or_else(|| header_str(req, REAL_IP).and_then(non_blank))
        .or_else(|| {
            let addr = req.remote_addr();
            addr.as_ipv4()
                .map(|v4| v4.ip().to_string())
                .or_else(|| addr.as_ipv6().map(|v6| v6.ip().to_string()))
        })
        .unwrap_or_else(|| UNKNOWN_CLIENT_VALUE.to_string())
}

/// ## Summary
/// Extracts bearer token, guest token, client IP and user agent from a request.
///
/// Guest tokens are taken from the configured header, then query parameter,
/// then cookie; the first non-blank value wins.
#[must_use]
pub fn extract_credentials(req: &salvo::Request, sources: &AccessConfig) -> Credentials {
    let bearer_token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_bearer);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .and_then(non_blank)
        .unwrap_or_else(|| UNKNOWN_CLIENT_VALUE.to_string());

    Credentials {
        bearer_token,
        guest_token: extract_guest_token(req, sources),
        client_ip: extract_client_ip(req, sources),
        user_agent,
    }
}
