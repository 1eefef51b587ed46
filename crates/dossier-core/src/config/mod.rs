use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub access: AccessConfig,
}

/// How bearer tokens are turned into user identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Delegate verification to the external authentication service.
    Remote,
    /// Never verify bearer tokens; only guest tokens can grant access.
    Disabled,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    pub remote: Option<RemoteAuthConfig>,
}

impl AuthConfig {
    /// ## Summary
    /// Returns the remote authentication settings, which must be present when
    /// the remote method is selected.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if `auth.remote` is missing.
    pub fn require_remote(&self) -> CoreResult<&RemoteAuthConfig> {
        self.remote.as_ref().ok_or_else(|| {
            CoreError::InvalidConfiguration(
                "auth.method is 'remote' but auth.remote is missing".to_string(),
            )
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteAuthConfig {
    /// Endpoint that answers `{ "user_id": .. }` for a valid bearer token.
    pub verify_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub serve_origin: Option<String>,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the address the server binds to, as `host:port`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// ## Summary
    /// Returns the server origin URL.
    #[must_use]
    pub fn origin(&self) -> String {
        if let Some(origin) = &self.serve_origin {
            origin.clone()
        } else {
            format!("http://{}", self.bind_addr())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Where guest tokens and client addresses are read from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    pub guest_token_header: String,
    pub guest_token_query: String,
    pub guest_token_cookie: String,
    /// Honour `X-Forwarded-For` when determining the client address.
    pub trust_forwarded_for: bool,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            guest_token_header: "x-guest-token".to_string(),
            guest_token_query: "guest_token".to_string(),
            guest_token_cookie: "guest_token".to_string(),
            trust_forwarded_for: true,
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("database.max_connections", 4)?
            .set_default("logging.level", "debug")?
            .set_default("auth.method", "remote")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Self>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks cross-field requirements that serde cannot express.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if the selected auth method lacks its settings.
    pub fn validate(&self) -> CoreResult<()> {
        match self.auth.method {
            AuthMethod::Remote => self.auth.require_remote().map(|_remote| ()),
            AuthMethod::Disabled => Ok(()),
        }
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
