mod common;

// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::{Value, json};
// self
use auth0_mcp_debugger::mcp::{Auth0McpServer, ToolResult};
use common::{test_config, test_http_client};

const WEBAPP: &str = "web-client";
const API: &str = "api-client";
const CALLBACK: &str = "https://app.example.com/callback";

fn build_server(server: &MockServer) -> Auth0McpServer {
	Auth0McpServer::with_http_client(test_config(server, "m2m", "secret"), test_http_client())
		.expect("Server should build for server tests.")
}

async fn mock_token(server: &MockServer) -> Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"mgmt-token\",\"token_type\":\"Bearer\",\"expires_in\":86400}",
			);
		})
		.await
}

async fn mock_clients(server: &MockServer, body: Value) -> Mock<'_> {
	server
		.mock_async(move |when, then| {
			when.method(GET).path("/api/v2/clients").header("authorization", "Bearer mgmt-token");
			then.status(200).header("content-type", "application/json").json_body(body);
		})
		.await
}

fn parse_text(result: &ToolResult) -> Value {
	serde_json::from_str(&result.text()).expect("Tool text should hold pretty-printed JSON.")
}

#[tokio::test]
async fn token_is_reused_across_tool_calls() {
	let server = MockServer::start_async().await;
	let mcp = build_server(&server);
	let token = mock_token(&server).await;
	let clients = mock_clients(
		&server,
		json!([{ "client_id": WEBAPP, "name": "Dashboard", "app_type": "spa", "tenant": "acme" }]),
	)
	.await;

	for _ in 0..2 {
		let result = mcp
			.call_tool("list_applications", Value::Null)
			.await
			.expect("Listing should not fault.");

		assert!(!result.is_error);

		let listed = parse_text(&result);

		assert_eq!(listed[0]["name"], "Dashboard");
		assert!(listed[0].get("tenant").is_none());
	}

	token.assert_calls_async(1).await;
	clients.assert_calls_async(2).await;
}

#[tokio::test]
async fn analyze_reports_clean_configuration() {
	let server = MockServer::start_async().await;
	let mcp = build_server(&server);
	let _token = mock_token(&server).await;
	let _clients = mock_clients(
		&server,
		json!([
			{
				"client_id": WEBAPP,
				"name": "Dashboard",
				"app_type": "spa",
				"callbacks": [CALLBACK],
				"grant_types": ["authorization_code", "refresh_token"]
			},
			{ "client_id": API, "name": "Backend", "app_type": "non_interactive" }
		]),
	)
	.await;
	let result = mcp
		.call_tool(
			"analyze_configuration",
			json!({ "webapp_client_id": WEBAPP, "api_client_id": API, "callback_url": CALLBACK }),
		)
		.await
		.expect("Analysis should not fault.");
	let analysis = parse_text(&result);

	assert!(!result.is_error);
	assert_eq!(analysis["webapp_application"]["found"], true);
	assert_eq!(analysis["webapp_application"]["callbacks"], json!([CALLBACK]));
	assert_eq!(analysis["api_application"]["found"], true);
	assert_eq!(analysis["issues"], json!([]));
	assert_eq!(analysis["recommendations"], json!([]));
}

#[tokio::test]
async fn analyze_flags_issues_in_rule_order() {
	let server = MockServer::start_async().await;
	let mcp = build_server(&server);
	let _token = mock_token(&server).await;
	let _clients = mock_clients(
		&server,
		json!([{
			"client_id": WEBAPP,
			"name": "Dashboard",
			"app_type": "regular_web",
			"callbacks": ["https://app.example.com/other"],
			"grant_types": ["client_credentials"]
		}]),
	)
	.await;
	let result = mcp
		.call_tool(
			"analyze_configuration",
			json!({ "webapp_client_id": WEBAPP, "api_client_id": API, "callback_url": CALLBACK }),
		)
		.await
		.expect("Analysis should not fault.");
	let analysis = parse_text(&result);

	assert!(!result.is_error);
	assert_eq!(
		analysis["issues"],
		json!([
			"Webapp application type is 'regular_web' but should be 'spa'",
			format!("Callback URL {CALLBACK} is not in the webapp's allowed callbacks"),
			"Authorization Code grant type not enabled",
			format!("API client ID {API} not found in Auth0 tenant"),
		])
	);
	assert_eq!(analysis["recommendations"].as_array().map(Vec::len), Some(3));
	assert_eq!(analysis["api_application"], json!({ "found": false, "searched_for": API }));
}

#[tokio::test]
async fn analyze_treats_blank_optionals_as_absent() {
	let server = MockServer::start_async().await;
	let mcp = build_server(&server);
	let _token = mock_token(&server).await;
	let _clients = mock_clients(&server, json!([])).await;
	let result = mcp
		.call_tool(
			"analyze_configuration",
			json!({ "webapp_client_id": WEBAPP, "api_client_id": "", "callback_url": "" }),
		)
		.await
		.expect("Analysis should not fault.");
	let analysis = parse_text(&result);

	assert_eq!(analysis["webapp_application"], json!({ "found": false }));
	assert_eq!(analysis["api_application"], json!({ "not_provided": true }));
	assert_eq!(
		analysis["issues"],
		json!([format!("Webapp client ID {WEBAPP} not found in Auth0 tenant")])
	);
	assert_eq!(analysis["recommendations"], json!([]));
}

#[tokio::test]
async fn upstream_failure_becomes_error_flagged_result() {
	let server = MockServer::start_async().await;
	let mcp = build_server(&server);
	let _token = mock_token(&server).await;
	let _settings = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v2/tenants/settings");
			then.status(500)
				.header("content-type", "application/json")
				.json_body(json!({ "statusCode": 500, "message": "boom" }));
		})
		.await;
	let result = mcp
		.call_tool("get_tenant_settings", json!({}))
		.await
		.expect("Upstream failures should not fault.");

	assert!(result.is_error);
	assert_eq!(
		result.text(),
		"Error: Auth0 Management API request to tenant settings failed with status 500: boom"
	);
}

#[tokio::test]
async fn failed_exchange_is_retried_on_next_call() {
	let server = MockServer::start_async().await;
	let mcp = build_server(&server);
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"access_denied\",\"error_description\":\"Unauthorized\"}");
		})
		.await;

	for _ in 0..2 {
		let result = mcp
			.call_tool("get_application", json!({ "client_id": WEBAPP }))
			.await
			.expect("Token failures should not fault.");

		assert!(result.is_error);
		assert_eq!(result.text(), "Error: Failed to obtain a management token: Unauthorized.");
	}

	assert!(mcp.credential_cache().current().await.is_none());

	token.assert_calls_async(2).await;
}

#[tokio::test]
async fn tools_call_envelope_returns_raw_application() {
	let server = MockServer::start_async().await;
	let mcp = build_server(&server);
	let _token = mock_token(&server).await;
	let _client = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v2/clients/web-client");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "client_id": WEBAPP, "is_first_party": true }));
		})
		.await;
	let line = json!({
		"jsonrpc": "2.0",
		"id": "call-1",
		"method": "tools/call",
		"params": { "name": "get_application", "arguments": { "client_id": WEBAPP } }
	})
	.to_string();
	let reply = mcp.handle_message(&line).await.expect("Request should be answered.");
	let reply: Value = serde_json::from_str(&reply).expect("Reply should be JSON.");

	assert_eq!(reply["id"], "call-1");
	assert_eq!(reply["result"]["isError"], false);
	assert_eq!(reply["result"]["content"][0]["type"], "text");

	let text = reply["result"]["content"][0]["text"].as_str().expect("Text block should be a string.");
	let record: Value = serde_json::from_str(text).expect("Text should hold the record.");

	assert_eq!(record["is_first_party"], true);
}

#[tokio::test]
async fn resources_read_returns_json_documents() {
	let server = MockServer::start_async().await;
	let mcp = build_server(&server);
	let _token = mock_token(&server).await;
	let _clients =
		mock_clients(&server, json!([{ "client_id": WEBAPP, "name": "Dashboard" }])).await;
	let contents =
		mcp.read_resource("auth0://applications").await.expect("Resource read should succeed.");
	let listed: Value = serde_json::from_str(&contents.text).expect("Resource text should be JSON.");

	assert_eq!(contents.uri, "auth0://applications");
	assert_eq!(contents.mime_type, "application/json");
	assert_eq!(listed[0]["client_id"], WEBAPP);
}

#[tokio::test]
async fn resource_upstream_failure_is_internal_error() {
	let server = MockServer::start_async().await;
	let mcp = build_server(&server);
	let _token = mock_token(&server).await;
	let _settings = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v2/tenants/settings");
			then.status(403)
				.header("content-type", "application/json")
				.json_body(json!({ "message": "Insufficient scope" }));
		})
		.await;
	let line = r#"{"jsonrpc":"2.0","id":9,"method":"resources/read","params":{"uri":"auth0://tenant-settings"}}"#;
	let reply = mcp.handle_message(line).await.expect("Request should be answered.");
	let reply: Value = serde_json::from_str(&reply).expect("Reply should be JSON.");

	assert_eq!(reply["error"]["code"], -32603);
	assert!(
		reply["error"]["message"]
			.as_str()
			.is_some_and(|message| message.contains("Insufficient scope"))
	);
}

#[tokio::test]
async fn dot_segment_client_id_never_reaches_the_collection() {
	let server = MockServer::start_async().await;
	let mcp = build_server(&server);
	let token = mock_token(&server).await;
	let clients = mock_clients(&server, json!([{ "client_id": WEBAPP }, { "client_id": API }])).await;
	let err = mcp
		.call_tool("get_application", json!({ "client_id": ".." }))
		.await
		.expect_err("Dot-segment ids should be rejected.");

	assert_eq!(err.code.code(), -32602);

	token.assert_calls_async(0).await;
	clients.assert_calls_async(0).await;
}
