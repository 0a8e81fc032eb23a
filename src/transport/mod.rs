//! HTTP transport abstraction and implementations
//!
//! This module defines the [`HttpTransport`] trait the [`AuthClient`]
//! uses for every outbound request. Concrete implementations live in
//! submodules:
//!
//! - [`http::ReqwestTransport`] -- the default, backed by a shared
//!   `reqwest::Client` with a fixed per-request timeout.
//! - [`fake::FakeTransport`] -- in-process fake that records requests and
//!   replays queued responses, for tests.
//!
//! # Design
//!
//! The trait is deliberately small: a `GET` and a form-encoded `POST`, both
//! returning the raw response body. Timeouts, connection pooling and any
//! retry policy belong to the implementation, never to the client.
//!
//! [`AuthClient`]: crate::client::AuthClient

use bytes::Bytes;

use crate::error::Result;

pub mod fake;
pub mod http;

pub use fake::{FakeResponse, FakeTransport, FakeTransportHandle, RecordedRequest};
pub use http::ReqwestTransport;

/// Content type sent with every form-encoded `POST`.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Abstraction over the HTTP client used to talk to the identity provider.
///
/// Implementations are used polymorphically through
/// `Arc<dyn HttpTransport>`.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a `GET` and return the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, times out, or the
    /// implementation considers the response a failure.
    async fn get(&self, url: &str) -> Result<Bytes>;

    /// Issue a `POST` with an already form-encoded body and return the
    /// response body.
    ///
    /// The request carries `Content-Type: application/x-www-form-urlencoded`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`HttpTransport::get`].
    async fn post_form(&self, url: &str, body: String) -> Result<Bytes>;
}
