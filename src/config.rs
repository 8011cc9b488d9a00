//! Process configuration sourced from the environment.

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// Tenant host variable (e.g. `tenant.eu.auth0.com`).
pub const DOMAIN_VAR: &str = "AUTH0_DOMAIN";
/// Machine-to-machine client identifier variable.
pub const CLIENT_ID_VAR: &str = "AUTH0_CLIENT_ID";
/// Machine-to-machine client secret variable.
pub const CLIENT_SECRET_VAR: &str = "AUTH0_CLIENT_SECRET";
/// Configured audience variable; read but not used by the token exchange.
pub const AUDIENCE_VAR: &str = "AUTH0_AUDIENCE";

/// Resolved server configuration.
///
/// The token exchange always targets [`Config::management_audience`], derived from the domain.
/// [`Config::audience`] is kept for visibility only and never sent upstream.
#[derive(Clone)]
pub struct Config {
	/// Tenant host.
	pub domain: String,
	/// Machine-to-machine client identifier.
	pub client_id: String,
	/// Machine-to-machine client secret.
	pub client_secret: Secret,
	/// Externally configured audience (unused by the exchange).
	pub audience: Option<String>,
	/// Base URL every endpoint is resolved against; `https://{domain}/` unless overridden.
	pub base_url: Url,
}
impl Config {
	/// Builds a configuration for the provided tenant and client credentials.
	pub fn new(
		domain: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self> {
		let domain = domain.into();
		let base_url = Url::parse(&format!("https://{domain}/"))
			.map_err(|source| ConfigError::InvalidDomain { domain: domain.clone(), source })?;

		Ok(Self {
			domain,
			client_id: client_id.into(),
			client_secret: Secret::new(client_secret),
			audience: None,
			base_url,
		})
	}

	/// Loads `.env` from the working directory when present, then reads the environment.
	pub fn load() -> Result<Self> {
		match dotenvy::dotenv() {
			Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
			Err(e) if e.not_found() => {},
			Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env file"),
		}

		Self::from_env()
	}

	/// Reads the configuration from process environment variables.
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Reads the configuration through `lookup`; blank values count as missing.
	pub fn from_lookup<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |name: &'static str| {
			lookup(name).filter(|value| !value.trim().is_empty()).ok_or(ConfigError::MissingVar { name })
		};
		let domain = read(DOMAIN_VAR)?;
		let client_id = read(CLIENT_ID_VAR)?;
		let client_secret = read(CLIENT_SECRET_VAR)?;
		let audience = read(AUDIENCE_VAR).ok();

		Ok(Self::new(domain, client_id, client_secret)?.with_audience(audience))
	}

	/// Sets or clears the externally configured audience.
	pub fn with_audience(mut self, audience: Option<String>) -> Self {
		self.audience = audience;

		self
	}

	/// Overrides the base URL (used to point the client at a mock tenant).
	pub fn with_base_url(mut self, base_url: Url) -> Self {
		self.base_url = base_url;

		self
	}

	/// Audience sent with every client-credentials exchange.
	pub fn management_audience(&self) -> String {
		format!("https://{}/api/v2/", self.domain)
	}

	/// Token endpoint (`/oauth/token`).
	pub fn token_endpoint(&self) -> Result<Url> {
		self.endpoint("token", &["oauth", "token"])
	}

	/// Authorization endpoint (`/authorize`); required by the OAuth client but never called.
	pub fn authorization_endpoint(&self) -> Result<Url> {
		self.endpoint("authorize", &["authorize"])
	}

	/// Resolves `segments` below the base URL.
	pub fn endpoint(&self, label: &'static str, segments: &[&str]) -> Result<Url> {
		let mut url = self.base_url.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::InvalidEndpoint { endpoint: label })?
			.pop_if_empty()
			.extend(segments);

		Ok(url)
	}
}
impl Debug for Config {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Config")
			.field("domain", &self.domain)
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("audience", &self.audience)
			.field("base_url", &self.base_url.as_str())
			.finish()
	}
}
