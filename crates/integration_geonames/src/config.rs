//! GeoNames client configuration

use std::fmt;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Environment variable prefix used by [`GeoNamesConfig::load`]
pub const ENV_PREFIX: &str = "GEONAMES";

/// Commercial account credentials, injected into every request
#[derive(Clone)]
pub struct Credentials {
    /// Account name, sent as `username`
    pub username: String,
    /// Optional premium token, sent as `token`
    pub token: Option<SecretString>,
}

impl Credentials {
    /// Create credentials without a token
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: None,
        }
    }

    /// Attach a premium token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Token value, if configured
    pub(crate) fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.expose_secret())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// GeoNames service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeoNamesConfig {
    /// Web service base URL (default: <http://ws.geonames.net>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Mirror servers for the transport layer; the client does not fail over by itself
    #[serde(default)]
    pub failover_servers: Vec<String>,

    /// Account name (free accounts need only this)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Premium token (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub token: Option<SecretString>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://ws.geonames.net".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("integration_geonames/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for GeoNamesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            failover_servers: Vec::new(),
            username: None,
            token: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl fmt::Debug for GeoNamesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoNamesConfig")
            .field("base_url", &self.base_url)
            .field("failover_servers", &self.failover_servers)
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl GeoNamesConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Point the client at a different base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use the given account credentials
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.username = Some(credentials.username);
        self.token = credentials.token;
        self
    }

    /// Credentials to inject, if a username is configured
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        self.username.as_ref().map(|username| Credentials {
            username: username.clone(),
            token: self.token.clone(),
        })
    }

    /// Load configuration from an optional `geonames` file in the working
    /// directory, overridden by `GEONAMES_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("geonames").required(false))
    }

    /// Load configuration from the given file, overridden by `GEONAMES_*`
    /// environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path.as_ref()))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(file)
            // e.g. GEONAMES_USERNAME, GEONAMES_BASE_URL, GEONAMES_FAILOVER_SERVERS=a,b
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("failover_servers")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_server_url("base_url", &self.base_url)?;

        for server in &self.failover_servers {
            validate_server_url("failover_servers", server)?;
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        match (&self.username, &self.token) {
            (Some(username), _) if username.trim().is_empty() => {
                Err("username must not be empty".to_string())
            },
            (None, Some(_)) => Err("token requires a username".to_string()),
            _ => Ok(()),
        }
    }
}

fn validate_server_url(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} must not be empty"));
    }

    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        Ok(_) => Err(format!("{field} must be an http(s) URL: {value}")),
        Err(e) => Err(format!("{field} is not a valid URL ({e}): {value}")),
    }
}
