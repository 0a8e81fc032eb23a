//! Error types for google-oauth2
//!
//! This module defines all error types used by the client, using
//! `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for OAuth operations
///
/// This enum covers configuration problems, transport failures, and the
/// ways an introspected access token can fail to belong to this client.
#[derive(Error, Debug)]
pub enum OAuthError {
    /// Configuration-related errors (missing client fields, bad endpoints)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failures that did not originate in `reqwest`
    /// (non-success HTTP status, fake transport failures)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The introspection endpoint answered with an empty body
    #[error("Could not find details for that access token")]
    EmptyResponse,

    /// The token was issued for a different client
    #[error("Audience mismatch: expected aud={expected}, got aud={actual}")]
    AudienceMismatch {
        /// The configured client ID
        expected: String,
        /// The `aud` value reported by the provider
        actual: String,
    },

    /// The token's granted scope differs from the scope that was requested
    #[error("Scope does not match requested scope: expected \"{expected}\", got \"{actual}\"")]
    ScopeMismatch {
        /// The scope resolved when the authorization URL was built
        expected: String,
        /// The `scope` value reported by the provider
        actual: String,
    },

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl OAuthError {
    /// Returns `true` when the error means the token does not belong to this
    /// client's request, as opposed to an infrastructure failure.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            OAuthError::EmptyResponse
                | OAuthError::AudienceMismatch { .. }
                | OAuthError::ScopeMismatch { .. }
        )
    }
}

/// Result type alias for OAuth operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type.
/// Callers that need to branch on the failure kind can
/// `downcast_ref::<OAuthError>()`.
pub type Result<T> = anyhow::Result<T>;
