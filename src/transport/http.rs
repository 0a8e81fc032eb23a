//! reqwest-backed implementation of [`HttpTransport`]

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;

use crate::config::TransportConfig;
use crate::error::{OAuthError, Result};
use crate::transport::{HttpTransport, FORM_CONTENT_TYPE};

/// Default transport: a `reqwest::Client` configured once at construction.
///
/// Non-success HTTP statuses are reported as [`OAuthError::Transport`]
/// carrying the status and the response body.
///
/// # Examples
///
/// ```
/// use google_oauth2::config::TransportConfig;
/// use google_oauth2::transport::ReqwestTransport;
///
/// let transport = ReqwestTransport::new(&TransportConfig::default()).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport from the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Http`] if the underlying client cannot be built
    /// (for example when the TLS backend fails to initialize).
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(OAuthError::Http)?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest::Client`, sharing its pool and settings.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn read_body(response: reqwest::Response) -> Result<Bytes> {
        let status = response.status();
        if !status.is_success() {
            let url = response.url().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthError::Transport(format!(
                "{} returned {}: {}",
                endpoint_name(&url),
                status,
                body
            ))
            .into());
        }
        Ok(response.bytes().await.map_err(OAuthError::Http)?)
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<Bytes> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(OAuthError::Http)?;
        tracing::debug!("GET {} -> {}", response.url().path(), response.status());
        Self::read_body(response).await
    }

    async fn post_form(&self, url: &str, body: String) -> Result<Bytes> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(OAuthError::Http)?;
        tracing::debug!("POST {} -> {}", response.url().path(), response.status());
        Self::read_body(response).await
    }
}

/// Scheme, host and path of a request URL, without the query string (which
/// may carry an access token).
fn endpoint_name(url: &reqwest::Url) -> String {
    format!(
        "{}://{}{}",
        url.scheme(),
        url.host_str().unwrap_or_default(),
        url.path()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_default_config() {
        assert!(ReqwestTransport::new(&TransportConfig::default()).is_ok());
    }

    #[test]
    fn test_endpoint_name_drops_query() {
        let url =
            reqwest::Url::parse("https://www.googleapis.com/oauth2/v3/tokeninfo?access_token=abc")
                .unwrap();
        assert_eq!(
            endpoint_name(&url),
            "https://www.googleapis.com/oauth2/v3/tokeninfo"
        );
    }
}
