//! Token exchange results

use serde::{Deserialize, Serialize};

use crate::json::FieldExtractor;

/// Tokens returned by the token endpoint.
///
/// Every field is a string read straight from the response; a field that is
/// absent, or present but not a JSON string, is empty. In particular Google
/// reports `expires_in` as a number, so [`TokenBundle::expires_in`] is
/// usually empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBundle {
    /// Access token
    pub access_token: String,
    /// Token type, normally `Bearer`
    pub token_type: String,
    /// Lifetime in seconds, when reported as a string
    pub expires_in: String,
    /// Refresh token, only issued for `access_type=offline`
    pub refresh_token: String,
    /// OpenID Connect ID token
    pub id_token: String,
}

impl TokenBundle {
    /// Reads the five token fields out of a token endpoint response.
    pub fn from_response(body: &[u8], extractor: &dyn FieldExtractor) -> Self {
        Self {
            access_token: extractor.get(body, "access_token"),
            token_type: extractor.get(body, "token_type"),
            expires_in: extractor.get(body, "expires_in"),
            refresh_token: extractor.get(body, "refresh_token"),
            id_token: extractor.get(body, "id_token"),
        }
    }
}

/// A token bundle whose access token passed introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedToken {
    /// Tokens from the exchange
    pub tokens: TokenBundle,
    /// Provider user ID (`userid` from introspection)
    pub subject: String,
}
