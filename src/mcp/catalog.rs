//! Tools and resources advertised to agents.

// crates.io
use serde_json::json;
// self
use crate::{
	_prelude::*,
	mcp::protocol::{JsonRpcError, ResourceDefinition, ToolDefinition},
};

/// Operations exposed through `tools/call`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tool {
	/// Fetch one application by client id.
	GetApplication,
	/// List every application in the tenant.
	ListApplications,
	/// Cross-check webapp and API application settings.
	AnalyzeConfiguration,
	/// Fetch tenant settings.
	GetTenantSettings,
}
impl Tool {
	/// Every tool, in advertisement order.
	pub const ALL: [Tool; 4] = [
		Tool::GetApplication,
		Tool::ListApplications,
		Tool::AnalyzeConfiguration,
		Tool::GetTenantSettings,
	];

	/// Wire name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Tool::GetApplication => "get_application",
			Tool::ListApplications => "list_applications",
			Tool::AnalyzeConfiguration => "analyze_configuration",
			Tool::GetTenantSettings => "get_tenant_settings",
		}
	}

	/// `tools/list` entry.
	pub fn definition(self) -> ToolDefinition {
		let (description, input_schema) = match self {
			Tool::GetApplication => (
				"Get the full configuration of an Auth0 application by client ID.",
				json!({
					"type": "object",
					"properties": {
						"client_id": {
							"type": "string",
							"description": "Client ID of the application to fetch."
						}
					},
					"required": ["client_id"]
				}),
			),
			Tool::ListApplications => (
				"List all applications in the Auth0 tenant with their callback, origin, and grant settings.",
				json!({ "type": "object", "properties": {} }),
			),
			Tool::AnalyzeConfiguration => (
				"Analyze a webapp application (and optionally its API application) for common misconfigurations.",
				json!({
					"type": "object",
					"properties": {
						"webapp_client_id": {
							"type": "string",
							"description": "Client ID of the browser-facing webapp application."
						},
						"api_client_id": {
							"type": "string",
							"description": "Client ID of the API application, if any."
						},
						"callback_url": {
							"type": "string",
							"description": "Callback URL the webapp is expected to allow."
						}
					},
					"required": ["webapp_client_id"]
				}),
			),
			Tool::GetTenantSettings => (
				"Get the Auth0 tenant settings.",
				json!({ "type": "object", "properties": {} }),
			),
		};

		ToolDefinition { name: self.as_str(), description, input_schema }
	}
}
impl FromStr for Tool {
	type Err = JsonRpcError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Tool::ALL
			.into_iter()
			.find(|tool| tool.as_str() == s)
			.ok_or_else(|| JsonRpcError::method_not_found(format!("Unknown tool: {s}")))
	}
}
impl Display for Tool {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Documents exposed through `resources/read`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
	/// Trimmed application listing.
	Applications,
	/// Raw tenant settings.
	TenantSettings,
}
impl Resource {
	/// Every resource, in advertisement order.
	pub const ALL: [Resource; 2] = [Resource::Applications, Resource::TenantSettings];
	/// Content type of every resource.
	pub const MIME_TYPE: &'static str = "application/json";

	/// Resource URI.
	pub const fn uri(self) -> &'static str {
		match self {
			Resource::Applications => "auth0://applications",
			Resource::TenantSettings => "auth0://tenant-settings",
		}
	}

	/// `resources/list` entry.
	pub fn definition(self) -> ResourceDefinition {
		let (name, description) = match self {
			Resource::Applications =>
				("Auth0 Applications", "All applications configured in the Auth0 tenant."),
			Resource::TenantSettings => ("Auth0 Tenant Settings", "Settings of the Auth0 tenant."),
		};

		ResourceDefinition { uri: self.uri(), name, description, mime_type: Self::MIME_TYPE }
	}
}
impl FromStr for Resource {
	type Err = JsonRpcError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Resource::ALL
			.into_iter()
			.find(|resource| resource.uri() == s)
			.ok_or_else(|| JsonRpcError::invalid_request(format!("Unknown resource: {s}")))
	}
}

/// `get_application` arguments.
#[derive(Clone, Debug, Deserialize)]
pub struct GetApplicationArgs {
	/// Client id to fetch.
	pub client_id: String,
}
impl GetApplicationArgs {
	/// Client id, usable as a single path segment.
	///
	/// Empty and dot-segment ids are rejected: URL normalization would turn them into a request
	/// for the whole collection.
	pub fn client_id(&self) -> Result<&str, JsonRpcError> {
		match self.client_id.as_str() {
			"" | "." | ".." => Err(JsonRpcError::invalid_params(format!(
				"client_id `{}` does not identify an application",
				self.client_id
			))),
			client_id => Ok(client_id),
		}
	}
}

/// `analyze_configuration` arguments.
#[derive(Clone, Debug, Deserialize)]
pub struct AnalyzeConfigurationArgs {
	/// Webapp client id.
	pub webapp_client_id: String,
	/// API client id; blank counts as absent.
	#[serde(default)]
	pub api_client_id: Option<String>,
	/// Expected callback URL; blank counts as absent.
	#[serde(default)]
	pub callback_url: Option<String>,
}
impl AnalyzeConfigurationArgs {
	/// API client id, if supplied and non-blank.
	pub fn api_client_id(&self) -> Option<&str> {
		non_blank(self.api_client_id.as_deref())
	}

	/// Expected callback URL, if supplied and non-blank.
	pub fn callback_url(&self) -> Option<&str> {
		non_blank(self.callback_url.as_deref())
	}
}

/// Decodes tool arguments, treating a missing object as empty.
pub fn decode_args<T>(tool: Tool, arguments: Value) -> Result<T, JsonRpcError>
where
	T: for<'de> Deserialize<'de>,
{
	let arguments = if arguments.is_null() { json!({}) } else { arguments };

	serde_path_to_error::deserialize(arguments).map_err(|e| {
		JsonRpcError::invalid_params(format!("Invalid arguments for {tool}: {e}"))
	})
}

fn non_blank(value: Option<&str>) -> Option<&str> {
	value.filter(|value| !value.is_empty())
}
