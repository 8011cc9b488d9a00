//! Request dispatch.
//!
//! Failures while a known tool runs (token exchange, Management API) come back as error-flagged
//! [`ToolResult`]s. Unknown tools, unknown resources, and malformed requests become JSON-RPC
//! faults.

// crates.io
use serde_json::json;
// self
use crate::{
	_prelude::*,
	analysis::{self, ConfigurationAnalysis},
	auth::{CredentialCache, Secret},
	config::Config,
	http::ReqwestHttpClient,
	management::{Application, ManagementClient},
	mcp::{
		catalog::{AnalyzeConfigurationArgs, GetApplicationArgs, Resource, Tool, decode_args},
		protocol::{
			JSONRPC_VERSION, JsonRpcError, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION,
			ResourceContents, ResourceReadParams, ToolCallParams, ToolResult, to_pretty_json,
		},
	},
	oauth::ClientCredentialsExchange,
	obs::{self, ToolOutcome, ToolSpan},
};

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = env!("CARGO_PKG_NAME");

/// Read-only tenant inspector answering MCP requests.
#[derive(Debug)]
pub struct Auth0McpServer {
	config: Arc<Config>,
	exchange: ClientCredentialsExchange,
	management: ManagementClient,
	cache: CredentialCache,
}
impl Auth0McpServer {
	/// Builds a server with the default HTTP client.
	pub fn new(config: Config) -> Result<Self> {
		Self::with_http_client(config, ReqwestHttpClient::new()?)
	}

	/// Builds a server on top of a caller-supplied HTTP client.
	pub fn with_http_client(config: Config, http_client: ReqwestHttpClient) -> Result<Self> {
		let config = Arc::new(config);
		let exchange = ClientCredentialsExchange::new(&config, http_client.clone())?;
		let management = ManagementClient::new(config.clone(), http_client);

		Ok(Self { config, exchange, management, cache: CredentialCache::new() })
	}

	/// Resolved configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Management-token cache shared by every call.
	pub fn credential_cache(&self) -> &CredentialCache {
		&self.cache
	}

	/// Returns a valid management token, exchanging client credentials when needed.
	pub async fn access_token(&self) -> Result<Secret> {
		let token =
			self.cache.acquire(OffsetDateTime::now_utc(), || self.exchange.exchange()).await?;

		Ok(token)
	}

	/// Trimmed listing of every application in the tenant.
	pub async fn list_applications(&self) -> Result<Vec<Application>> {
		let token = self.access_token().await?;

		self.management.list_applications(&token).await
	}

	/// Full application record, as the provider returns it.
	pub async fn get_application(&self, client_id: &str) -> Result<Value> {
		let token = self.access_token().await?;

		self.management.get_application(&token, client_id).await
	}

	/// Tenant settings, as the provider returns them.
	pub async fn get_tenant_settings(&self) -> Result<Value> {
		let token = self.access_token().await?;

		self.management.get_tenant_settings(&token).await
	}

	/// Lists the tenant and runs the analyzer over the requested records.
	pub async fn analyze_configuration(
		&self,
		webapp_client_id: &str,
		api_client_id: Option<&str>,
		callback_url: Option<&str>,
	) -> Result<ConfigurationAnalysis> {
		let applications = self.list_applications().await?;
		let analysis = analysis::analyze_tenant(
			&applications,
			webapp_client_id,
			api_client_id,
			callback_url,
		);

		tracing::debug!(
			webapp_client_id,
			issues = analysis.issues.len(),
			searched = applications.len(),
			"analyzed configuration"
		);

		Ok(analysis)
	}

	/// `tools/list` payload.
	pub fn list_tools(&self) -> Value {
		json!({ "tools": Tool::ALL.map(Tool::definition) })
	}

	/// `resources/list` payload.
	pub fn list_resources(&self) -> Value {
		json!({ "resources": Resource::ALL.map(Resource::definition) })
	}

	/// Runs one tool.
	///
	/// Unknown names and bad arguments are faults; every failure after that is reported inside
	/// the returned [`ToolResult`].
	pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolResult, JsonRpcError> {
		let tool = name.parse::<Tool>()?;
		let span = ToolSpan::new(tool.as_str());

		obs::record_tool_outcome(tool.as_str(), ToolOutcome::Attempt);

		let result = span.instrument(self.dispatch(tool, arguments)).await;
		let outcome = match &result {
			Ok(result) if !result.is_error => ToolOutcome::Success,
			_ => ToolOutcome::Failure,
		};

		obs::record_tool_outcome(tool.as_str(), outcome);

		result
	}

	/// Reads one resource. Upstream failures become internal-error faults.
	pub async fn read_resource(&self, uri: &str) -> Result<ResourceContents, JsonRpcError> {
		let resource = uri.parse::<Resource>()?;
		let text = match resource {
			Resource::Applications => render(self.list_applications().await),
			Resource::TenantSettings => render(self.get_tenant_settings().await),
		}
		.map_err(|e| {
			tracing::warn!(uri, error = %e, "resource read failed");

			JsonRpcError::internal(e.to_string())
		})?;

		Ok(ResourceContents { uri: resource.uri().to_owned(), mime_type: Resource::MIME_TYPE, text })
	}

	/// Handles one raw line. Returns the encoded reply, or `None` for notifications.
	pub async fn handle_message(&self, line: &str) -> Option<String> {
		let value = match serde_json::from_str::<Value>(line) {
			Ok(value) => value,
			Err(e) => {
				tracing::warn!(error = %e, "unparseable message");

				return encode(&JsonRpcResponse::failure(Value::Null, JsonRpcError::parse_error(e)));
			},
		};
		let id = value.get("id").cloned().unwrap_or(Value::Null);
		let request: Result<JsonRpcRequest, _> = serde_path_to_error::deserialize(value);
		let request = match request {
			Ok(request) => request,
			Err(e) => {
				let error = JsonRpcError::invalid_request(format!("Invalid request: {e}"));

				return encode(&JsonRpcResponse::failure(id, error));
			},
		};

		if request.is_notification() {
			tracing::debug!(method = %request.method, "notification received");

			return None;
		}

		let id = request.id.clone().unwrap_or(Value::Null);
		let response = match self.handle_request(request).await {
			Ok(result) => JsonRpcResponse::success(id, result),
			Err(error) => JsonRpcResponse::failure(id, error),
		};

		encode(&response)
	}

	/// Dispatches a decoded request to its method handler.
	pub async fn handle_request(&self, request: JsonRpcRequest) -> Result<Value, JsonRpcError> {
		if request.jsonrpc != JSONRPC_VERSION {
			return Err(JsonRpcError::invalid_request(format!(
				"Unsupported JSON-RPC version: {}",
				request.jsonrpc
			)));
		}

		tracing::debug!(method = %request.method, "handling request");

		match request.method.as_str() {
			"initialize" => Ok(json!({
				"protocolVersion": PROTOCOL_VERSION,
				"capabilities": { "tools": {}, "resources": {} },
				"serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") }
			})),
			"ping" => Ok(json!({})),
			"tools/list" => Ok(self.list_tools()),
			"tools/call" => {
				let params: ToolCallParams = decode_params(request.params)?;
				let result = self.call_tool(&params.name, params.arguments).await?;

				to_value(&result)
			},
			"resources/list" => Ok(self.list_resources()),
			"resources/read" => {
				let params: ResourceReadParams = decode_params(request.params)?;
				let contents = self.read_resource(&params.uri).await?;

				Ok(json!({ "contents": [contents] }))
			},
			method => Err(JsonRpcError::method_not_found(format!("Method not found: {method}"))),
		}
	}

	async fn dispatch(&self, tool: Tool, arguments: Value) -> Result<ToolResult, JsonRpcError> {
		let rendered = match tool {
			Tool::GetApplication => {
				let args: GetApplicationArgs = decode_args(tool, arguments)?;

				render(self.get_application(args.client_id()?).await)
			},
			Tool::ListApplications => render(self.list_applications().await),
			Tool::AnalyzeConfiguration => {
				let args: AnalyzeConfigurationArgs = decode_args(tool, arguments)?;

				render(
					self.analyze_configuration(
						&args.webapp_client_id,
						args.api_client_id(),
						args.callback_url(),
					)
					.await,
				)
			},
			Tool::GetTenantSettings => render(self.get_tenant_settings().await),
		};

		match rendered {
			Ok(text) => Ok(ToolResult::success(text)),
			Err(e) => {
				tracing::warn!(error = %e, "tool call failed");

				Ok(ToolResult::error(e))
			},
		}
	}
}

#[derive(Debug, ThisError)]
enum RenderError {
	#[error(transparent)]
	Call(#[from] Error),
	#[error("Failed to encode the response: {0}")]
	Encode(#[from] serde_json::Error),
}

fn render<T>(result: Result<T>) -> Result<String, RenderError>
where
	T: Serialize,
{
	Ok(to_pretty_json(&result?)?)
}

fn decode_params<T>(params: Value) -> Result<T, JsonRpcError>
where
	T: for<'de> Deserialize<'de>,
{
	serde_path_to_error::deserialize(params)
		.map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {e}")))
}

fn to_value<T>(data: &T) -> Result<Value, JsonRpcError>
where
	T: Serialize,
{
	serde_json::to_value(data).map_err(|e| JsonRpcError::internal(e.to_string()))
}

fn encode(response: &JsonRpcResponse) -> Option<String> {
	match serde_json::to_string(response) {
		Ok(line) => Some(line),
		Err(e) => {
			tracing::error!(error = %e, "failed to encode response");

			None
		},
	}
}
