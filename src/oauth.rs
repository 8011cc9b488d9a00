//! Client-credentials exchange against the tenant's token endpoint.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, AuthUrl, ClientId, ClientSecret, EndpointNotSet, EndpointSet, HttpClientError,
	RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError},
};
// self
use crate::{
	_prelude::*,
	auth::IssuedToken,
	config::Config,
	error::AuthenticationError,
	http::{ReqwestHttpClient, ResponseMetadata, ResponseMetadataSlot},
};

type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Performs the `client_credentials` grant for the Management API.
///
/// Client id and secret travel in the request body alongside
/// `audience=https://{domain}/api/v2/`. The externally configured audience is ignored.
#[derive(Clone)]
pub struct ClientCredentialsExchange {
	oauth_client: ConfiguredBasicClient,
	http_client: ReqwestHttpClient,
	token_url: Url,
	audience: String,
}
impl ClientCredentialsExchange {
	/// Builds the exchange from the resolved configuration.
	pub fn new(config: &Config, http_client: ReqwestHttpClient) -> Result<Self> {
		let token_endpoint = config.token_endpoint()?;
		let auth_url = AuthUrl::from_url(config.authorization_endpoint()?);
		let token_url = TokenUrl::from_url(token_endpoint.clone());
		let oauth_client = BasicClient::new(ClientId::new(config.client_id.clone()))
			.set_client_secret(ClientSecret::new(config.client_secret.expose().to_owned()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url)
			.set_auth_type(AuthType::RequestBody);

		if config.audience.as_deref().is_some_and(|aud| aud != config.management_audience()) {
			tracing::warn!(
				configured = config.audience.as_deref().unwrap_or_default(),
				used = %config.management_audience(),
				"AUTH0_AUDIENCE is ignored; the Management API audience is derived from AUTH0_DOMAIN"
			);
		}

		Ok(Self {
			oauth_client,
			http_client,
			token_url: token_endpoint,
			audience: config.management_audience(),
		})
	}

	/// Audience sent with every exchange.
	pub fn audience(&self) -> &str {
		&self.audience
	}

	/// Requests a fresh management token. Single attempt; no retry.
	pub async fn exchange(&self) -> Result<IssuedToken, AuthenticationError> {
		let meta = ResponseMetadataSlot::default();
		let instrumented = self.http_client.instrumented(meta.clone());
		let response = self
			.oauth_client
			.exchange_client_credentials()
			.add_extra_param("audience", self.audience.clone())
			.request_async(&instrumented)
			.await
			.map_err(|err| map_request_error(meta.take(), err))?;
		let expires_in = response.expires_in().ok_or(AuthenticationError::MissingExpiresIn)?;
		let expires_in = i64::try_from(expires_in.as_secs())
			.ok()
			.filter(|secs| *secs > 0)
			.ok_or(AuthenticationError::NonPositiveExpiresIn)?;

		tracing::info!(expires_in, "obtained management token");

		Ok(IssuedToken::new(response.access_token().secret().to_owned(), Duration::seconds(expires_in)))
	}
}
impl Debug for ClientCredentialsExchange {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentialsExchange")
			.field("token_url", &self.token_url.as_str())
			.field("audience", &self.audience)
			.finish()
	}
}

fn map_request_error(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<ReqwestError>>,
) -> AuthenticationError {
	let status = meta.and_then(|value| value.status);

	match err {
		RequestTokenError::ServerResponse(response) => map_server_response_error(response, status),
		RequestTokenError::Request(error) => map_transport_error(error, status),
		RequestTokenError::Parse(source, body) =>
			AuthenticationError::malformed_response(source, status, &body),
		RequestTokenError::Other(message) => AuthenticationError::Unexpected { message, status },
	}
}

fn map_server_response_error(response: BasicErrorResponse, status: Option<u16>) -> AuthenticationError {
	let message = match response.error_description() {
		Some(description) => description.clone(),
		None => response.error().as_ref().to_string(),
	};

	AuthenticationError::Rejected { message, status }
}

fn map_transport_error(
	err: HttpClientError<ReqwestError>,
	status: Option<u16>,
) -> AuthenticationError {
	match err {
		HttpClientError::Reqwest(inner) => AuthenticationError::network(*inner),
		HttpClientError::Http(inner) => AuthenticationError::Http(inner),
		HttpClientError::Io(inner) => AuthenticationError::Io(inner),
		HttpClientError::Other(message) => AuthenticationError::Unexpected { message, status },
		_ => AuthenticationError::Unexpected {
			message: "HTTP client error occurred while calling the token endpoint".into(),
			status,
		},
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn audience_is_derived_from_domain() {
		let config = Config::new("tenant.example.com", "m2m", "secret")
			.expect("Config should build.")
			.with_audience(Some("https://custom.example.com/".into()));
		let exchange = ClientCredentialsExchange::new(
			&config,
			ReqwestHttpClient::new().expect("HTTP client should build."),
		)
		.expect("Exchange should build.");

		assert_eq!(exchange.audience(), "https://tenant.example.com/api/v2/");
	}

	#[test]
	fn provider_description_wins_over_error_code() {
		let response: BasicErrorResponse = serde_json::from_str(
			r#"{"error":"access_denied","error_description":"Unauthorized"}"#,
		)
		.expect("Error body should parse.");
		let err = map_server_response_error(response, Some(401));

		assert_eq!(err.to_string(), "Failed to obtain a management token: Unauthorized.");
	}

	#[test]
	fn error_code_is_used_without_description() {
		let response: BasicErrorResponse =
			serde_json::from_str(r#"{"error":"invalid_client"}"#).expect("Error body should parse.");

		assert!(matches!(
			map_server_response_error(response, Some(401)),
			AuthenticationError::Rejected { ref message, status: Some(401) } if message == "invalid_client"
		));
	}
}
