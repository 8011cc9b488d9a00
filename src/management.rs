//! Read-only Management API client.
//!
//! Every call is a single bearer-authenticated GET. Non-success responses surface as
//! [`UpstreamError::Status`] with the provider's message embedded verbatim; nothing is retried.

pub mod application;

pub use application::*;

// crates.io
use reqwest::{Response, header::AUTHORIZATION};
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, auth::Secret, config::Config, error::UpstreamError, http::ReqwestHttpClient};

const CLIENTS: &str = "clients";
const CLIENT: &str = "client";
const TENANT_SETTINGS: &str = "tenant settings";

/// Thin wrapper over the three Management API reads the server exposes.
#[derive(Clone, Debug)]
pub struct ManagementClient {
	http_client: ReqwestHttpClient,
	config: Arc<Config>,
}
impl ManagementClient {
	/// Creates a client resolving endpoints below the configured base URL.
	pub fn new(config: Arc<Config>, http_client: ReqwestHttpClient) -> Self {
		Self { http_client, config }
	}

	/// `GET /api/v2/clients`, decoded into trimmed [`Application`] records.
	pub async fn list_applications(&self, token: &Secret) -> Result<Vec<Application>> {
		let url = self.config.endpoint(CLIENTS, &["api", "v2", "clients"])?;

		self.get_json(CLIENTS, url, token).await
	}

	/// `GET /api/v2/clients/{id}`, returned as the provider sent it.
	pub async fn get_application(&self, token: &Secret, client_id: &str) -> Result<Value> {
		let url = self.config.endpoint(CLIENT, &["api", "v2", "clients", client_id])?;

		self.get_json(CLIENT, url, token).await
	}

	/// `GET /api/v2/tenants/settings`, returned as the provider sent it.
	pub async fn get_tenant_settings(&self, token: &Secret) -> Result<Value> {
		let url = self.config.endpoint(TENANT_SETTINGS, &["api", "v2", "tenants", "settings"])?;

		self.get_json(TENANT_SETTINGS, url, token).await
	}

	async fn get_json<T>(&self, endpoint: &'static str, url: Url, token: &Secret) -> Result<T>
	where
		T: DeserializeOwned,
	{
		tracing::debug!(endpoint, url = %url, "calling Management API");

		let response = self
			.http_client
			.get(url)
			.header(AUTHORIZATION, format!("Bearer {}", token.expose()))
			.send()
			.await
			.map_err(|source| UpstreamError::Network { endpoint, source })?;

		if !response.status().is_success() {
			return Err(status_error(endpoint, response).await.into());
		}

		let body = response.bytes().await.map_err(|source| UpstreamError::Network { endpoint, source })?;
		let de = &mut serde_json::Deserializer::from_slice(&body);

		serde_path_to_error::deserialize(de)
			.map_err(|source| UpstreamError::Decode { endpoint, source }.into())
	}
}

#[derive(Deserialize)]
struct ProviderErrorBody {
	message: Option<String>,
	error: Option<String>,
}

async fn status_error(endpoint: &'static str, response: Response) -> UpstreamError {
	let status = response.status();
	let body = response.text().await.unwrap_or_default();
	let message = serde_json::from_str::<ProviderErrorBody>(&body)
		.ok()
		.and_then(|parsed| parsed.message.or(parsed.error))
		.or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_owned()))
		.unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown status").to_owned());

	tracing::warn!(endpoint, status = status.as_u16(), %message, "Management API call failed");

	UpstreamError::Status { endpoint, status: status.as_u16(), message }
}
