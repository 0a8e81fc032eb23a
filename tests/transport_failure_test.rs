//! Failure propagation through a mocked transport
//!
//! Uses `mockall` to assert how many requests each operation issues and that
//! a failing transport short-circuits the flow.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use mockall::mock;

use google_oauth2::{
    AuthClient, AuthSession, ClientConfig, HttpTransport, OAuthError, ProviderEndpoints,
};

mock! {
    pub Transport {}

    #[async_trait]
    impl HttpTransport for Transport {
        async fn get(&self, url: &str) -> google_oauth2::Result<Bytes>;
        async fn post_form(&self, url: &str, body: String) -> google_oauth2::Result<Bytes>;
    }
}

fn client_with(transport: MockTransport) -> AuthClient {
    AuthClient::with_parts(
        ClientConfig::new("client-id", "client-secret", "https://app.example.com/cb").unwrap(),
        ProviderEndpoints::default(),
        Arc::new(transport),
    )
}

#[tokio::test]
async fn test_exchange_failure_never_reaches_introspection() {
    let mut transport = MockTransport::new();
    transport
        .expect_post_form()
        .times(1)
        .returning(|_, _| Err(OAuthError::Transport("connection reset".to_string()).into()));
    transport.expect_get().never();

    let client = client_with(transport);
    let err = client
        .get_and_verify_token(&AuthSession::with_scope("email"), "code")
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<OAuthError>(),
        Some(OAuthError::Transport(msg)) if msg == "connection reset"
    ));
}

#[tokio::test]
async fn test_introspection_failure_is_returned_unchanged() {
    let mut transport = MockTransport::new();
    transport.expect_post_form().times(1).returning(|_, _| {
        Ok(Bytes::from_static(
            br#"{"access_token":"ya29.mock","token_type":"Bearer"}"#,
        ))
    });
    transport
        .expect_get()
        .times(1)
        .returning(|_| Err(OAuthError::Transport("503 Service Unavailable".to_string()).into()));

    let client = client_with(transport);
    let err = client
        .get_and_verify_token(&AuthSession::with_scope("email"), "code")
        .await
        .unwrap_err();

    let oauth = err.downcast_ref::<OAuthError>().expect("OAuthError");
    assert!(matches!(oauth, OAuthError::Transport(_)));
    assert!(!oauth.is_verification_failure());
}

#[tokio::test]
async fn test_verify_token_issues_one_request_per_call() {
    let mut transport = MockTransport::new();
    transport.expect_post_form().never();
    transport.expect_get().times(2).returning(|_| {
        Ok(Bytes::from_static(
            br#"{"aud":"client-id","scope":"email","userid":"99"}"#,
        ))
    });

    let client = client_with(transport);
    let session = AuthSession::with_scope("email");

    // No caching: both calls hit the transport.
    assert_eq!(client.verify_token(&session, "t").await.unwrap(), "99");
    assert_eq!(client.verify_token(&session, "t").await.unwrap(), "99");
}

#[tokio::test]
async fn test_get_auth_url_never_touches_transport() {
    let mut transport = MockTransport::new();
    transport.expect_get().never();
    transport.expect_post_form().never();

    let client = client_with(transport);
    let auth = client
        .get_auth_url(&google_oauth2::AuthUrlParams::default())
        .unwrap();
    assert!(auth.url.contains("client_id=client-id"));
}
