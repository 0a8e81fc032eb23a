//! In-process fake transport for unit and integration tests
//!
//! This module provides [`FakeTransport`] and [`FakeTransportHandle`], an
//! in-process pair that replaces real network I/O in tests.
//!
//! # Usage
//!
//! Call [`FakeTransport::new`] to obtain a `(FakeTransport, FakeTransportHandle)`
//! pair. Wire the [`FakeTransport`] into the client under test and queue the
//! responses it should return. From the test side, use the
//! [`FakeTransportHandle`] to read every request the client issued.
//!
//! When no response is queued the fake answers on its own:
//!
//! - `GET` returns an empty body.
//! - `POST` echoes the request back as `"<url> <body>"`, which lets a test
//!   assert on the exact target and form body from the return value alone.
//!
//! # Example
//!
//! ```
//! use google_oauth2::transport::{FakeResponse, FakeTransport, HttpTransport, RecordedRequest};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (transport, mut handle) = FakeTransport::new();
//! transport.push_get(FakeResponse::json(serde_json::json!({"aud": "id"})));
//!
//! let body = transport.get("https://example.com/tokeninfo").await.unwrap();
//! assert!(body.starts_with(b"{"));
//!
//! let echoed = transport.post_form("https://example.com/token", "a=1".to_string()).await.unwrap();
//! assert_eq!(&echoed[..], b"https://example.com/token a=1");
//!
//! assert!(matches!(handle.requests_rx.recv().await, Some(RecordedRequest::Get { .. })));
//! # }
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::error::{OAuthError, Result};
use crate::transport::HttpTransport;

/// A request observed by a [`FakeTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedRequest {
    /// A `GET` to `url`
    Get {
        /// Full request URL, including the query string
        url: String,
    },
    /// A form-encoded `POST` to `url`
    PostForm {
        /// Request URL
        url: String,
        /// Form-encoded request body
        body: String,
    },
}

/// A canned reply queued on a [`FakeTransport`].
#[derive(Debug, Clone)]
pub enum FakeResponse {
    /// Successful response with the given body
    Body(Bytes),
    /// Transport failure reported as [`OAuthError::Transport`]
    Fail(String),
}

impl FakeResponse {
    /// Successful response carrying a serialized JSON value.
    pub fn json(value: serde_json::Value) -> Self {
        FakeResponse::Body(Bytes::from(value.to_string()))
    }

    /// Successful response carrying raw text.
    pub fn text(body: impl Into<String>) -> Self {
        FakeResponse::Body(Bytes::from(body.into()))
    }

    /// Successful response with an empty body.
    pub fn empty() -> Self {
        FakeResponse::Body(Bytes::new())
    }

    /// Transport failure with the given message.
    pub fn fail(message: impl Into<String>) -> Self {
        FakeResponse::Fail(message.into())
    }
}

/// In-process fake transport for use in tests.
///
/// Responses are served first-in first-out, separately for `GET` and `POST`.
#[derive(Debug)]
pub struct FakeTransport {
    requests_tx: mpsc::UnboundedSender<RecordedRequest>,
    get_responses: Mutex<VecDeque<FakeResponse>>,
    post_responses: Mutex<VecDeque<FakeResponse>>,
}

impl FakeTransport {
    /// Create a new `(FakeTransport, FakeTransportHandle)` pair.
    pub fn new() -> (Self, FakeTransportHandle) {
        let (requests_tx, requests_rx) = mpsc::unbounded_channel();
        let transport = Self {
            requests_tx,
            get_responses: Mutex::new(VecDeque::new()),
            post_responses: Mutex::new(VecDeque::new()),
        };
        (transport, FakeTransportHandle { requests_rx })
    }

    /// Queue the reply for the next `GET`.
    pub fn push_get(&self, response: FakeResponse) {
        lock(&self.get_responses).push_back(response);
    }

    /// Queue the reply for the next `POST`.
    pub fn push_post(&self, response: FakeResponse) {
        lock(&self.post_responses).push_back(response);
    }

    fn record(&self, request: RecordedRequest) {
        // The handle may have been dropped by tests that only care about
        // return values.
        let _ = self.requests_tx.send(request);
    }
}

/// The test-side handle for a [`FakeTransport`].
#[derive(Debug)]
pub struct FakeTransportHandle {
    /// Receives every request the transport served, in order.
    pub requests_rx: mpsc::UnboundedReceiver<RecordedRequest>,
}

impl FakeTransportHandle {
    /// Drains all requests recorded so far without waiting.
    pub fn drain(&mut self) -> Vec<RecordedRequest> {
        let mut requests = Vec::new();
        while let Ok(request) = self.requests_rx.try_recv() {
            requests.push(request);
        }
        requests
    }
}

#[async_trait::async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, url: &str) -> Result<Bytes> {
        self.record(RecordedRequest::Get {
            url: url.to_string(),
        });
        let queued = lock(&self.get_responses).pop_front();
        match queued {
            Some(response) => into_result(response),
            None => Ok(Bytes::new()),
        }
    }

    async fn post_form(&self, url: &str, body: String) -> Result<Bytes> {
        self.record(RecordedRequest::PostForm {
            url: url.to_string(),
            body: body.clone(),
        });
        let queued = lock(&self.post_responses).pop_front();
        match queued {
            Some(response) => into_result(response),
            None => Ok(Bytes::from(format!("{} {}", url, body))),
        }
    }
}

fn into_result(response: FakeResponse) -> Result<Bytes> {
    match response {
        FakeResponse::Body(body) => Ok(body),
        FakeResponse::Fail(message) => Err(OAuthError::Transport(message).into()),
    }
}

fn lock(queue: &Mutex<VecDeque<FakeResponse>>) -> MutexGuard<'_, VecDeque<FakeResponse>> {
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
