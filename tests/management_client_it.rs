mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use auth0_mcp_debugger::{
	auth::Secret,
	error::{Error, UpstreamError},
	management::ManagementClient,
};
use common::{test_config, test_http_client};

const TOKEN: &str = "mgmt-token";

fn build_client(server: &MockServer) -> ManagementClient {
	ManagementClient::new(Arc::new(test_config(server, "m2m", "secret")), test_http_client())
}

#[tokio::test]
async fn list_applications_sends_bearer_and_trims_records() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v2/clients").header("authorization", "Bearer mgmt-token");
			then.status(200).header("content-type", "application/json").json_body(json!([
				{
					"client_id": "web",
					"name": "Dashboard",
					"app_type": "spa",
					"callbacks": ["https://app.example.com/callback"],
					"grant_types": ["authorization_code"],
					"tenant": "acme",
					"signing_keys": [{ "cert": "..." }]
				},
				{ "client_id": "m2m", "name": "Backend", "app_type": "non_interactive" }
			]));
		})
		.await;
	let applications = client
		.list_applications(&Secret::new(TOKEN))
		.await
		.expect("Listing should succeed against the mock tenant.");

	assert_eq!(applications.len(), 2);
	assert!(applications[0].is_spa());
	assert!(applications[1].callbacks.is_empty());

	let trimmed = serde_json::to_value(&applications[0]).expect("Application should serialize.");

	assert!(trimmed.get("tenant").is_none());
	assert!(trimmed.get("signing_keys").is_none());

	mock.assert_async().await;
}

#[tokio::test]
async fn get_application_passes_provider_message_through() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v2/clients/missing");
			then.status(404).header("content-type", "application/json").json_body(json!({
				"statusCode": 404,
				"error": "Not Found",
				"message": "The client does not exist",
				"errorCode": "inexistent_client"
			}));
		})
		.await;
	let err = client
		.get_application(&Secret::new(TOKEN), "missing")
		.await
		.expect_err("Unknown client should surface as an upstream error.");

	assert!(matches!(
		err,
		Error::Upstream(UpstreamError::Status { status: 404, ref message, .. })
			if message == "The client does not exist"
	));
	assert_eq!(
		err.to_string(),
		"Auth0 Management API request to client failed with status 404: The client does not exist"
	);

	mock.assert_async().await;
}

#[tokio::test]
async fn get_application_returns_full_record() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let body = json!({
		"client_id": "web",
		"name": "Dashboard",
		"is_first_party": true,
		"refresh_token": { "rotation_type": "rotating" }
	});
	let expected = body.clone();
	let mock = server
		.mock_async(move |when, then| {
			when.method(GET).path("/api/v2/clients/web");
			then.status(200).header("content-type", "application/json").json_body(body);
		})
		.await;
	let record = client
		.get_application(&Secret::new(TOKEN), "web")
		.await
		.expect("Fetching a known client should succeed.");

	assert_eq!(record, expected);

	mock.assert_async().await;
}

#[tokio::test]
async fn tenant_settings_error_without_json_uses_body_text() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v2/tenants/settings");
			then.status(502).body("upstream unavailable");
		})
		.await;
	let err = client
		.get_tenant_settings(&Secret::new(TOKEN))
		.await
		.expect_err("Gateway failures should surface.");

	assert!(matches!(
		err,
		Error::Upstream(UpstreamError::Status { status: 502, ref message, .. })
			if message == "upstream unavailable"
	));

	mock.assert_async().await;
}
