//! Configuration management for google-oauth2
//!
//! This module holds the client credentials, the HTTP transport settings,
//! and the provider endpoints, and handles loading them from a YAML file
//! and validating them.

use crate::error::{OAuthError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Google's authorization endpoint (browser redirect target)
pub const DEFAULT_AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google's token endpoint
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v4/token";

/// Google's token introspection endpoint
pub const DEFAULT_TOKENINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/tokeninfo";

/// Top-level configuration file structure
///
/// Only the `client` section is required; `transport` and `endpoints` fall
/// back to their defaults when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OAuth client credentials
    pub client: ClientConfig,

    /// HTTP transport settings
    #[serde(default)]
    pub transport: TransportConfig,

    /// Provider endpoint overrides
    #[serde(default)]
    pub endpoints: ProviderEndpoints,
}

/// OAuth client credentials registered with the identity provider
///
/// Immutable once validated; every request the client issues takes its
/// `client_id`, `client_secret` and `redirect_url` from here.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// OAuth client ID
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret
    #[serde(default)]
    pub client_secret: String,

    /// Redirect URL registered for this client
    #[serde(default)]
    pub redirect_url: String,
}

impl ClientConfig {
    /// Creates validated client credentials.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Config`] naming the first empty field, checked
    /// in the order `client_id`, `client_secret`, `redirect_url`.
    ///
    /// # Examples
    ///
    /// ```
    /// use google_oauth2::config::ClientConfig;
    ///
    /// let config = ClientConfig::new("id", "secret", "https://example.com/cb").unwrap();
    /// assert_eq!(config.client_id, "id");
    ///
    /// assert!(ClientConfig::new("", "secret", "https://example.com/cb").is_err());
    /// ```
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Result<Self> {
        let config = Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url: redirect_url.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that all three credentials are present.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Config`] naming the first missing field.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.is_empty() {
            return Err(OAuthError::Config(
                "client_id is required for Google OAuth".to_string(),
            )
            .into());
        }

        if self.client_secret.is_empty() {
            return Err(OAuthError::Config(
                "client_secret is required for Google OAuth".to_string(),
            )
            .into());
        }

        if self.redirect_url.is_empty() {
            return Err(OAuthError::Config(
                "redirect_url is required for Google OAuth".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

// Keep the secret out of logs and panic messages.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_url", &self.redirect_url)
            .finish()
    }
}

/// HTTP transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// `User-Agent` header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_seconds() -> u64 {
    2
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

/// Identity provider endpoints
///
/// Defaults to Google. Overriding them is mostly useful for pointing the
/// client at a local mock server in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
    /// Authorization endpoint the user's browser is sent to
    #[serde(default = "default_authorization_endpoint")]
    pub authorization: String,

    /// Token endpoint for the code exchange
    #[serde(default = "default_token_endpoint")]
    pub token: String,

    /// Token introspection endpoint
    #[serde(default = "default_tokeninfo_endpoint")]
    pub tokeninfo: String,
}

fn default_authorization_endpoint() -> String {
    DEFAULT_AUTHORIZATION_ENDPOINT.to_string()
}

fn default_token_endpoint() -> String {
    DEFAULT_TOKEN_ENDPOINT.to_string()
}

fn default_tokeninfo_endpoint() -> String {
    DEFAULT_TOKENINFO_ENDPOINT.to_string()
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            authorization: default_authorization_endpoint(),
            token: default_token_endpoint(),
            tokeninfo: default_tokeninfo_endpoint(),
        }
    }
}

impl ProviderEndpoints {
    /// Builds endpoints rooted at `base`, using the same paths as Google.
    ///
    /// # Examples
    ///
    /// ```
    /// use google_oauth2::config::ProviderEndpoints;
    ///
    /// let endpoints = ProviderEndpoints::with_base("http://127.0.0.1:8080");
    /// assert_eq!(endpoints.token, "http://127.0.0.1:8080/oauth2/v4/token");
    /// ```
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            authorization: format!("{}/o/oauth2/v2/auth", base),
            token: format!("{}/oauth2/v4/token", base),
            tokeninfo: format!("{}/oauth2/v3/tokeninfo", base),
        }
    }

    /// Checks that every endpoint is an absolute `http` or `https` URL.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Config`] for the first endpoint that fails.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("authorization", &self.authorization),
            ("token", &self.token),
            ("tokeninfo", &self.tokeninfo),
        ] {
            let url = Url::parse(value).map_err(|e| {
                OAuthError::Config(format!("endpoints.{} is not a valid URL: {}", name, e))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(OAuthError::Config(format!(
                    "endpoints.{} must use http or https, got {}",
                    name,
                    url.scheme()
                ))
                .into());
            }
        }
        Ok(())
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    ///
    /// The result is not validated; call [`Config::validate`] before use.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Config`] if the file cannot be read and
    /// [`OAuthError::Yaml`] if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading OAuth configuration from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|e| {
            OAuthError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&contents)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Yaml`] if the document is malformed.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).map_err(|e| OAuthError::from(e).into())
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        self.client.validate()?;

        if self.transport.timeout_seconds == 0 {
            return Err(OAuthError::Config(
                "transport.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        self.endpoints.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_error_message(result: Result<ClientConfig>) -> String {
        match result.unwrap_err().downcast::<OAuthError>() {
            Ok(OAuthError::Config(message)) => message,
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_client_config_missing_client_id_wins() {
        let message = config_error_message(ClientConfig::new("", "", ""));
        assert_eq!(message, "client_id is required for Google OAuth");
    }

    #[test]
    fn test_client_config_missing_secret() {
        let message = config_error_message(ClientConfig::new("id", "", "https://example.com"));
        assert_eq!(message, "client_secret is required for Google OAuth");
    }

    #[test]
    fn test_client_config_missing_redirect() {
        let message = config_error_message(ClientConfig::new("id", "secret", ""));
        assert_eq!(message, "redirect_url is required for Google OAuth");
    }

    #[test]
    fn test_client_config_debug_redacts_secret() {
        let config = ClientConfig::new("id", "super-secret", "https://example.com").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_transport_defaults() {
        let transport = TransportConfig::default();
        assert_eq!(transport.timeout_seconds, 2);
        assert!(transport.user_agent.starts_with("google-oauth2/"));
    }

    #[test]
    fn test_endpoint_defaults_are_google() {
        let endpoints = ProviderEndpoints::default();
        assert_eq!(endpoints.authorization, DEFAULT_AUTHORIZATION_ENDPOINT);
        assert_eq!(endpoints.token, DEFAULT_TOKEN_ENDPOINT);
        assert_eq!(endpoints.tokeninfo, DEFAULT_TOKENINFO_ENDPOINT);
        assert!(endpoints.validate().is_ok());
    }

    #[test]
    fn test_endpoints_with_base_strips_trailing_slash() {
        let endpoints = ProviderEndpoints::with_base("http://localhost:9000/");
        assert_eq!(
            endpoints.tokeninfo,
            "http://localhost:9000/oauth2/v3/tokeninfo"
        );
    }

    #[test]
    fn test_endpoints_validation_rejects_relative_url() {
        let endpoints = ProviderEndpoints {
            token: "/oauth2/v4/token".to_string(),
            ..ProviderEndpoints::default()
        };
        assert!(endpoints.validate().is_err());
    }

    #[test]
    fn test_endpoints_validation_rejects_non_http_scheme() {
        let endpoints = ProviderEndpoints {
            tokeninfo: "ftp://example.com/tokeninfo".to_string(),
            ..ProviderEndpoints::default()
        };
        let err = endpoints.validate().unwrap_err();
        assert!(err.to_string().contains("endpoints.tokeninfo"));
    }

    #[test]
    fn test_config_from_yaml_minimal() {
        let yaml = r#"
client:
  client_id: my-client
  client_secret: my-secret
  redirect_url: https://app.example.com/callback
"#;

        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.client.client_id, "my-client");
        assert_eq!(config.transport.timeout_seconds, 2);
        assert_eq!(config.endpoints, ProviderEndpoints::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_yaml_with_overrides() {
        let yaml = r#"
client:
  client_id: my-client
  client_secret: my-secret
  redirect_url: https://app.example.com/callback
transport:
  timeout_seconds: 10
endpoints:
  token: http://127.0.0.1:4000/token
"#;

        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.transport.timeout_seconds, 10);
        assert!(config.transport.user_agent.starts_with("google-oauth2/"));
        assert_eq!(config.endpoints.token, "http://127.0.0.1:4000/token");
        assert_eq!(config.endpoints.tokeninfo, DEFAULT_TOKENINFO_ENDPOINT);
    }

    #[test]
    fn test_config_validation_missing_client_field() {
        let yaml = r#"
client:
  client_id: my-client
  redirect_url: https://app.example.com/callback
"#;

        let config = Config::from_yaml(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("client_secret"));
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let yaml = r#"
client:
  client_id: my-client
  client_secret: my-secret
  redirect_url: https://app.example.com/callback
transport:
  timeout_seconds: 0
"#;

        let config = Config::from_yaml(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml_malformed() {
        let err = Config::from_yaml("client: [unterminated").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OAuthError>(),
            Some(OAuthError::Yaml(_))
        ));
    }

    #[test]
    fn test_config_load_missing_file() {
        let err = Config::load("/nonexistent/google-oauth2.yaml").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OAuthError>(),
            Some(OAuthError::Config(_))
        ));
    }
}
