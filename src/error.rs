//! Crate-level error types shared by configuration, token exchange, and Management API calls.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; fatal at startup.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Management token could not be obtained.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),
	/// Management API call failed.
	#[error(transparent)]
	Upstream(#[from] UpstreamError),
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Required environment variable is missing or blank.
	#[error("Missing required environment variable {name}.")]
	MissingVar {
		/// Name of the missing variable.
		name: &'static str,
	},
	/// Tenant domain cannot be turned into a base URL.
	#[error("AUTH0_DOMAIN `{domain}` is not a valid host.")]
	InvalidDomain {
		/// Domain as configured.
		domain: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint URL derived from the base URL is invalid.
	#[error("Endpoint `{endpoint}` cannot be derived from the base URL.")]
	InvalidEndpoint {
		/// Endpoint label.
		endpoint: &'static str,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Client-credentials exchange failures.
///
/// Every variant leaves the credential cache empty so the next operation retries the exchange.
#[derive(Debug, ThisError)]
pub enum AuthenticationError {
	/// Token endpoint rejected the exchange.
	#[error("Failed to obtain a management token: {message}.")]
	Rejected {
		/// Provider-supplied message.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Network failure while calling the token endpoint.
	#[error("Network error occurred while calling the token endpoint: {source}")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// I/O failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
	/// Token request could not be built.
	#[error("Token request could not be built.")]
	Http(#[from] oauth2::http::Error),
	/// Token endpoint responded with JSON that could not be parsed.
	#[error(
		"Token endpoint returned malformed JSON (status {}): {source}; body: {body}",
		display_status(.status)
	)]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Leading part of the response body.
		body: String,
	},
	/// Token endpoint response omitted `expires_in`.
	#[error("Token endpoint response is missing expires_in.")]
	MissingExpiresIn,
	/// Token endpoint returned a zero or out-of-range `expires_in`.
	#[error("Token endpoint returned an unusable expires_in value.")]
	NonPositiveExpiresIn,
	/// Anything else the HTTP stack reported.
	#[error("Token endpoint call failed: {message}.")]
	Unexpected {
		/// Human-readable summary.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}
impl AuthenticationError {
	/// Longest body excerpt kept on [`AuthenticationError::MalformedResponse`].
	pub const BODY_EXCERPT_CHARS: usize = 256;

	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a token response that could not be parsed, keeping an excerpt of its body.
	pub fn malformed_response(
		source: serde_path_to_error::Error<serde_json::Error>,
		status: Option<u16>,
		body: &[u8],
	) -> Self {
		let body =
			String::from_utf8_lossy(body).trim().chars().take(Self::BODY_EXCERPT_CHARS).collect();

		Self::MalformedResponse { source, status, body }
	}
}

fn display_status(status: &Option<u16>) -> String {
	status.map_or_else(|| "unknown".into(), |status| status.to_string())
}

/// Management API failures.
#[derive(Debug, ThisError)]
pub enum UpstreamError {
	/// Non-success HTTP status.
	#[error("Auth0 Management API request to {endpoint} failed with status {status}: {message}")]
	Status {
		/// Endpoint label.
		endpoint: &'static str,
		/// HTTP status code.
		status: u16,
		/// Provider-supplied message, surfaced verbatim.
		message: String,
	},
	/// Network failure.
	#[error("Network error occurred while calling {endpoint}: {source}")]
	Network {
		/// Endpoint label.
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: ReqwestError,
	},
	/// Response body could not be decoded.
	#[error("Auth0 Management API returned an undecodable body for {endpoint}: {source}")]
	Decode {
		/// Endpoint label.
		endpoint: &'static str,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl UpstreamError {
	/// HTTP status code, when the failure carried one.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			Self::Network { source, .. } => source.status().map(|code| code.as_u16()),
			Self::Decode { .. } => None,
		}
	}
}
