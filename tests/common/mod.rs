//! Shared helpers for the `httpmock`-backed integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::MockServer;
// self
use auth0_mcp_debugger::{config::Config, http::ReqwestHttpClient, reqwest::Client, url::Url};

/// Tenant host every test config is built for.
pub const DOMAIN: &str = "tenant.example.com";

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock`.
pub fn test_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure reqwest client for tests.");

	ReqwestHttpClient(client)
}

/// Config pointing every endpoint at `server`.
pub fn test_config(server: &MockServer, client_id: &str, client_secret: &str) -> Config {
	Config::new(DOMAIN, client_id, client_secret)
		.expect("Config should build for integration tests.")
		.with_base_url(Url::parse(&server.base_url()).expect("Mock base URL should parse."))
}
