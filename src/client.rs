//! Google OAuth2 authorization-code flow client
//!
//! [`AuthClient`] covers the three steps of a server-side sign-in:
//!
//! 1. Build the URL the user's browser is redirected to
//!    ([`AuthClient::get_auth_url`]). This also produces an [`AuthSession`]
//!    holding the scope that was requested.
//! 2. Exchange the `code` the provider sends back for tokens
//!    ([`AuthClient::get_token`]).
//! 3. Ask the provider to introspect the access token and check that it was
//!    issued to this client for the requested scope
//!    ([`AuthClient::verify_token`]).
//!
//! [`AuthClient::get_and_verify_token`] runs steps 2 and 3 back to back.
//!
//! The client holds no per-flow state. The requested scope travels in the
//! [`AuthSession`], which the caller keeps (typically in its own session
//! store, next to the `state` value) between the redirect and the callback.
//! One client can therefore serve any number of concurrent sign-ins.
//!
//! # References
//!
//! - <https://developers.google.com/identity/protocols/OAuth2WebServer>
//! - <https://developers.google.com/identity/protocols/OAuth2UserAgent#validate-access-token>

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

use crate::config::{ClientConfig, Config, ProviderEndpoints, TransportConfig};
use crate::error::{OAuthError, Result};
use crate::json::{FieldExtractor, JsonFieldExtractor};
use crate::token::{TokenBundle, VerifiedToken};
use crate::transport::{HttpTransport, ReqwestTransport};

/// `email` scope
pub const SCOPE_EMAIL: &str = "email";
/// `profile` scope
pub const SCOPE_PROFILE: &str = "profile";
/// Full URI form of the user-info email scope
pub const SCOPE_USERINFO_EMAIL: &str = "https://www.googleapis.com/auth/userinfo.email";
/// Full URI form of the user-info profile scope
pub const SCOPE_USERINFO_PROFILE: &str = "https://www.googleapis.com/auth/userinfo.profile";

const ACCESS_TYPE_ONLINE: &str = "online";
const ACCESS_TYPE_OFFLINE: &str = "offline";

const PROMPT_CONSENT: &str = "consent";
const PROMPT_SELECT_ACCOUNT: &str = "select_account";

/// Scope requested when the caller does not name one.
pub fn default_scope() -> String {
    [
        SCOPE_EMAIL,
        SCOPE_PROFILE,
        SCOPE_USERINFO_EMAIL,
        SCOPE_USERINFO_PROFILE,
    ]
    .join(" ")
}

fn default_prompt() -> String {
    [PROMPT_CONSENT, PROMPT_SELECT_ACCOUNT].join(" ")
}

/// Caller-supplied parameters for [`AuthClient::get_auth_url`].
///
/// Every field may be left empty; see [`AuthClient::get_auth_url`] for the
/// defaults applied.
///
/// # Examples
///
/// ```
/// use google_oauth2::client::AuthUrlParams;
///
/// let params = AuthUrlParams {
///     access_type: "online".to_string(),
///     state: "csrf-token".to_string(),
///     ..AuthUrlParams::default()
/// };
/// assert!(params.scope.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthUrlParams {
    /// Space-separated scopes
    pub scope: String,
    /// `online` or `offline`
    pub access_type: String,
    /// Opaque value echoed back on the redirect
    pub state: String,
    /// Incremental authorization flag; always sent as `true`
    pub include_granted_scopes: String,
    /// Email or subject hint for the account chooser
    pub login_hint: String,
    /// Space-separated prompt values
    pub prompt: String,
}

/// Per-sign-in values needed to verify the token that comes back.
///
/// Produced by [`AuthClient::get_auth_url`]. The default session has an
/// empty scope, so verification against it only accepts tokens whose
/// introspected scope is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Scope resolved when the authorization URL was built
    pub scope: String,
    /// `state` value sent with the authorization URL
    pub state: String,
}

impl AuthSession {
    /// Session expecting the given scope, for callers that restore it from
    /// their own storage.
    pub fn with_scope(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            state: String::new(),
        }
    }
}

/// Result of [`AuthClient::get_auth_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationUrl {
    /// URL to redirect the user's browser to
    pub url: String,
    /// Values to keep until the callback arrives
    pub session: AuthSession,
}

/// Authorization-code flow client bound to one set of credentials.
///
/// # Examples
///
/// ```
/// use google_oauth2::client::{AuthClient, AuthUrlParams};
///
/// let client = AuthClient::new("client-id", "client-secret", "https://app.example.com/cb").unwrap();
/// let auth = client.get_auth_url(&AuthUrlParams::default()).unwrap();
/// assert!(auth.url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?scope="));
/// assert!(auth.session.scope.starts_with("email profile"));
/// ```
pub struct AuthClient {
    config: ClientConfig,
    endpoints: ProviderEndpoints,
    transport: Arc<dyn HttpTransport>,
    extractor: Arc<dyn FieldExtractor>,
}

impl AuthClient {
    /// Creates a client with the default transport and Google endpoints.
    ///
    /// No network calls are made.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Config`] naming the first empty argument, and
    /// [`OAuthError::Http`] if the default HTTP client cannot be built.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Result<Self> {
        let config = ClientConfig::new(client_id, client_secret, redirect_url)?;
        let transport = ReqwestTransport::new(&TransportConfig::default())?;
        Ok(Self::with_parts(
            config,
            ProviderEndpoints::default(),
            Arc::new(transport),
        ))
    }

    /// Creates a client from a loaded configuration file.
    ///
    /// # Errors
    ///
    /// Returns the first [`Config::validate`] failure, or
    /// [`OAuthError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config.transport)?;
        Ok(Self::with_parts(
            config.client.clone(),
            config.endpoints.clone(),
            Arc::new(transport),
        ))
    }

    /// Assembles a client from already-validated parts.
    pub fn with_parts(
        config: ClientConfig,
        endpoints: ProviderEndpoints,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            config,
            endpoints,
            transport,
            extractor: Arc::new(JsonFieldExtractor),
        }
    }

    /// Replaces the HTTP transport.
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replaces the response field extractor.
    pub fn with_extractor(mut self, extractor: Arc<dyn FieldExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replaces the provider endpoints.
    pub fn with_endpoints(mut self, endpoints: ProviderEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// The client credentials.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The provider endpoints in use.
    pub fn endpoints(&self) -> &ProviderEndpoints {
        &self.endpoints
    }

    /// Builds the authorization URL for a new sign-in.
    ///
    /// Defaults, each applied independently:
    ///
    /// - empty `scope` becomes [`default_scope`];
    /// - `include_granted_scopes` is always `true`;
    /// - `access_type` is `online` only when exactly `"online"`, otherwise
    ///   `offline`;
    /// - empty `prompt` becomes `consent select_account`.
    ///
    /// `state` and `login_hint` are passed through; `redirect_uri` and
    /// `client_id` always come from the client's configuration. Parameters
    /// are appended in the order `scope, access_type,
    /// include_granted_scopes, state, redirect_uri, response_type,
    /// login_hint, prompt, client_id`, each form-urlencoded.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Config`] only if the configured authorization
    /// endpoint is not a valid URL.
    pub fn get_auth_url(&self, params: &AuthUrlParams) -> Result<AuthorizationUrl> {
        let scope = if params.scope.is_empty() {
            default_scope()
        } else {
            params.scope.clone()
        };

        let access_type = if params.access_type == ACCESS_TYPE_ONLINE {
            ACCESS_TYPE_ONLINE
        } else {
            ACCESS_TYPE_OFFLINE
        };

        let prompt = if params.prompt.is_empty() {
            default_prompt()
        } else {
            params.prompt.clone()
        };

        let mut url = parse_endpoint("authorization", &self.endpoints.authorization)?;
        url.query_pairs_mut()
            .append_pair("scope", &scope)
            .append_pair("access_type", access_type)
            .append_pair("include_granted_scopes", "true")
            .append_pair("state", &params.state)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("login_hint", &params.login_hint)
            .append_pair("prompt", &prompt)
            .append_pair("client_id", &self.config.client_id);

        Ok(AuthorizationUrl {
            url: url.into(),
            session: AuthSession {
                scope,
                state: params.state.clone(),
            },
        })
    }

    /// Exchanges an authorization code for tokens.
    ///
    /// POSTs `client_id`, `client_secret`, `code`,
    /// `grant_type=authorization_code` and `redirect_uri` (in that order) as
    /// a form to the token endpoint and returns the response body untouched.
    ///
    /// # Errors
    ///
    /// Propagates transport failures. The code itself is not checked.
    pub async fn get_token(&self, code: &str) -> Result<Bytes> {
        let url = parse_endpoint("token", &self.endpoints.token)?;
        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.config.client_id)
            .append_pair("client_secret", &self.config.client_secret)
            .append_pair("code", code)
            .append_pair("grant_type", "authorization_code")
            .append_pair("redirect_uri", &self.config.redirect_url)
            .finish();

        tracing::debug!("Exchanging authorization code at {}", url);
        self.transport.post_form(url.as_str(), body).await
    }

    /// Introspects an access token and returns the provider's user ID.
    ///
    /// The token must have been issued to this client (`aud` equals the
    /// client ID) for exactly the scope recorded in `session`. Every call
    /// goes to the network; nothing is cached.
    ///
    /// # Errors
    ///
    /// - [`OAuthError::EmptyResponse`] if the provider returns no body.
    /// - [`OAuthError::AudienceMismatch`] if `aud` differs from the client ID.
    /// - [`OAuthError::ScopeMismatch`] if `scope` differs from `session.scope`.
    /// - Any transport failure.
    pub async fn verify_token(&self, session: &AuthSession, access_token: &str) -> Result<String> {
        let mut url = parse_endpoint("tokeninfo", &self.endpoints.tokeninfo)?;
        url.query_pairs_mut()
            .append_pair("access_token", access_token);

        tracing::debug!("Introspecting access token at {}", self.endpoints.tokeninfo);
        let body = self.transport.get(url.as_str()).await?;

        if body.is_empty() {
            return Err(OAuthError::EmptyResponse.into());
        }

        let aud = self.extractor.get(&body, "aud");
        let scope = self.extractor.get(&body, "scope");
        let user_id = self.extractor.get(&body, "userid");

        if aud != self.config.client_id {
            return Err(OAuthError::AudienceMismatch {
                expected: self.config.client_id.clone(),
                actual: aud,
            }
            .into());
        }

        if scope != session.scope {
            return Err(OAuthError::ScopeMismatch {
                expected: session.scope.clone(),
                actual: scope,
            }
            .into());
        }

        Ok(user_id)
    }

    /// Exchanges `code` for tokens and verifies the resulting access token.
    ///
    /// Either every field of the returned [`VerifiedToken`] comes from a
    /// successful exchange and introspection, or the first error is
    /// returned.
    ///
    /// # Errors
    ///
    /// Any error from [`AuthClient::get_token`] or
    /// [`AuthClient::verify_token`].
    pub async fn get_and_verify_token(
        &self,
        session: &AuthSession,
        code: &str,
    ) -> Result<VerifiedToken> {
        let body = self.get_token(code).await?;
        let tokens = TokenBundle::from_response(&body, self.extractor.as_ref());
        let subject = self.verify_token(session, &tokens.access_token).await?;
        tracing::debug!("Access token verified for subject {}", subject);
        Ok(VerifiedToken { tokens, subject })
    }
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("config", &self.config)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

fn parse_endpoint(name: &str, value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| {
        OAuthError::Config(format!("endpoints.{} is not a valid URL: {}", name, e)).into()
    })
}
