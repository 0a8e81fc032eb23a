use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use google_oauth2::transport::{FakeTransport, FakeTransportHandle};
use google_oauth2::{AuthClient, ClientConfig, ProviderEndpoints};
use tempfile::TempDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[allow(dead_code)]
pub const CLIENT_ID: &str = "fakeClientID";
#[allow(dead_code)]
pub const CLIENT_SECRET: &str = "fakeClientSecret";
#[allow(dead_code)]
pub const REDIRECT_URL: &str = "fakeRedirectURL";

/// Installs a test-friendly subscriber once per test binary.
///
/// `RUST_LOG` overrides the default `google_oauth2=debug` filter.
#[allow(dead_code)]
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("google_oauth2=debug"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Client wired to a [`FakeTransport`] with Google's default endpoints.
#[allow(dead_code)]
pub fn fake_client() -> (AuthClient, Arc<FakeTransport>, FakeTransportHandle) {
    let (transport, handle) = FakeTransport::new();
    let transport = Arc::new(transport);
    let client = AuthClient::with_parts(
        ClientConfig::new(CLIENT_ID, CLIENT_SECRET, REDIRECT_URL).expect("valid client config"),
        ProviderEndpoints::default(),
        transport.clone(),
    );
    (client, transport, handle)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("oauth.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
