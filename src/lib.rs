//! google-oauth2 - Google sign-in via the OAuth2 authorization-code flow
//!
//! This library builds Google authorization URLs, exchanges authorization
//! codes for tokens, and verifies access tokens against Google's
//! introspection endpoint.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `client`: The [`AuthClient`] and its per-sign-in [`AuthSession`]
//! - `config`: Client credentials, transport settings, endpoints, YAML loading
//! - `error`: Error types and result aliases
//! - `json`: Tolerant field extraction from JSON response bodies
//! - `token`: Token exchange results
//! - `transport`: HTTP transport abstraction (reqwest and an in-process fake)
//!
//! # Example
//!
//! ```no_run
//! use google_oauth2::{AuthClient, AuthUrlParams};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AuthClient::new("client-id", "client-secret", "https://app.example.com/cb")?;
//!
//!     // Redirect the browser to `auth.url`, keep `auth.session` until the callback.
//!     let auth = client.get_auth_url(&AuthUrlParams::default())?;
//!
//!     // On the callback, exchange and verify the code.
//!     let verified = client.get_and_verify_token(&auth.session, "code-from-callback").await?;
//!     println!("signed in as {}", verified.subject);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod json;
pub mod token;
pub mod transport;

// Re-export commonly used types
pub use client::{AuthClient, AuthSession, AuthUrlParams, AuthorizationUrl};
pub use config::{ClientConfig, Config, ProviderEndpoints, TransportConfig};
pub use error::{OAuthError, Result};
pub use json::{FieldExtractor, JsonFieldExtractor};
pub use token::{TokenBundle, VerifiedToken};
pub use transport::HttpTransport;
