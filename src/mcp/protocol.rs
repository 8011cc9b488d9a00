//! JSON-RPC 2.0 envelopes and the MCP payload types this server exchanges.

// self
use crate::_prelude::*;

/// JSON-RPC version tag.
pub const JSONRPC_VERSION: &str = "2.0";
/// MCP revision advertised during `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Incoming JSON-RPC message. A missing `id` marks a notification.
#[derive(Clone, Debug, Deserialize)]
pub struct JsonRpcRequest {
	/// Version tag; must be `2.0`.
	pub jsonrpc: String,
	/// Request id; absent for notifications.
	#[serde(default)]
	pub id: Option<Value>,
	/// Method name.
	pub method: String,
	/// Method parameters.
	#[serde(default)]
	pub params: Value,
}
impl JsonRpcRequest {
	/// Returns `true` when no reply is expected.
	pub fn is_notification(&self) -> bool {
		self.id.is_none()
	}
}

/// Outgoing JSON-RPC message.
#[derive(Clone, Debug, Serialize)]
pub struct JsonRpcResponse {
	/// Version tag.
	pub jsonrpc: &'static str,
	/// Echoed request id (`null` when the request could not be read).
	pub id: Value,
	/// Success payload.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub result: Option<Value>,
	/// Fault payload.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<JsonRpcError>,
}
impl JsonRpcResponse {
	/// Builds a success response.
	pub fn success(id: Value, result: Value) -> Self {
		Self { jsonrpc: JSONRPC_VERSION, id, result: Some(result), error: None }
	}

	/// Builds a fault response.
	pub fn failure(id: Value, error: JsonRpcError) -> Self {
		Self { jsonrpc: JSONRPC_VERSION, id, result: None, error: Some(error) }
	}
}

/// Standard JSON-RPC fault codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "i64")]
pub enum ErrorCode {
	/// Line is not valid JSON.
	ParseError,
	/// Envelope or resource reference is invalid.
	InvalidRequest,
	/// Unknown method or tool.
	MethodNotFound,
	/// Tool arguments are missing or ill-typed.
	InvalidParams,
	/// Server-side failure outside the tool error channel.
	InternalError,
}
impl ErrorCode {
	/// Numeric wire code.
	pub const fn code(self) -> i64 {
		match self {
			Self::ParseError => -32700,
			Self::InvalidRequest => -32600,
			Self::MethodNotFound => -32601,
			Self::InvalidParams => -32602,
			Self::InternalError => -32603,
		}
	}
}
impl From<ErrorCode> for i64 {
	fn from(code: ErrorCode) -> Self {
		code.code()
	}
}

/// Protocol-level fault.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
#[error("{message} ({})", .code.code())]
pub struct JsonRpcError {
	/// Fault code.
	pub code: ErrorCode,
	/// Human-readable message.
	pub message: String,
}
impl JsonRpcError {
	/// Creates a fault with the given code.
	pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
		Self { code, message: message.into() }
	}

	/// `-32700`.
	pub fn parse_error(detail: impl Display) -> Self {
		Self::new(ErrorCode::ParseError, format!("Parse error: {detail}"))
	}

	/// `-32600`.
	pub fn invalid_request(message: impl Into<String>) -> Self {
		Self::new(ErrorCode::InvalidRequest, message)
	}

	/// `-32601`.
	pub fn method_not_found(message: impl Into<String>) -> Self {
		Self::new(ErrorCode::MethodNotFound, message)
	}

	/// `-32602`.
	pub fn invalid_params(message: impl Into<String>) -> Self {
		Self::new(ErrorCode::InvalidParams, message)
	}

	/// `-32603`.
	pub fn internal(message: impl Into<String>) -> Self {
		Self::new(ErrorCode::InternalError, message)
	}
}

/// `tools/call` parameters.
#[derive(Clone, Debug, Deserialize)]
pub struct ToolCallParams {
	/// Tool name.
	pub name: String,
	/// Tool arguments.
	#[serde(default)]
	pub arguments: Value,
}

/// `resources/read` parameters.
#[derive(Clone, Debug, Deserialize)]
pub struct ResourceReadParams {
	/// Resource URI.
	pub uri: String,
}

/// Content block returned by tools.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
	/// Text content.
	Text {
		/// Payload.
		text: String,
	},
}

/// `tools/call` result. Upstream failures travel here with `is_error` set, not as faults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToolResult {
	/// Content blocks.
	pub content: Vec<ContentBlock>,
	/// Whether the tool failed.
	#[serde(rename = "isError")]
	pub is_error: bool,
}
impl ToolResult {
	/// Successful result holding one text block.
	pub fn success(text: impl Into<String>) -> Self {
		Self { content: vec![ContentBlock::Text { text: text.into() }], is_error: false }
	}

	/// Successful result holding pretty-printed JSON.
	pub fn json<T>(data: &T) -> Result<Self, serde_json::Error>
	where
		T: ?Sized + Serialize,
	{
		Ok(Self::success(to_pretty_json(data)?))
	}

	/// Error-flagged result.
	pub fn error(message: impl Display) -> Self {
		Self { content: vec![ContentBlock::Text { text: format!("Error: {message}") }], is_error: true }
	}

	/// Concatenated text of all blocks.
	pub fn text(&self) -> String {
		self.content
			.iter()
			.map(|block| match block {
				ContentBlock::Text { text } => text.as_str(),
			})
			.collect()
	}
}

/// Advertised tool.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToolDefinition {
	/// Tool name.
	pub name: &'static str,
	/// Human-readable description.
	pub description: &'static str,
	/// JSON Schema for the arguments.
	#[serde(rename = "inputSchema")]
	pub input_schema: Value,
}

/// Advertised resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceDefinition {
	/// Resource URI.
	pub uri: &'static str,
	/// Display name.
	pub name: &'static str,
	/// Human-readable description.
	pub description: &'static str,
	/// Content type.
	#[serde(rename = "mimeType")]
	pub mime_type: &'static str,
}

/// One entry of a `resources/read` result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceContents {
	/// Resource URI.
	pub uri: String,
	/// Content type.
	#[serde(rename = "mimeType")]
	pub mime_type: &'static str,
	/// Pretty-printed JSON payload.
	pub text: String,
}

/// Serializes with two-space indentation, the format every textual payload uses.
pub fn to_pretty_json<T>(data: &T) -> Result<String, serde_json::Error>
where
	T: ?Sized + Serialize,
{
	serde_json::to_string_pretty(data)
}
