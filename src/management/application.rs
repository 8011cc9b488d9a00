//! Application (client) records as returned by the Management API.

// self
use crate::_prelude::*;

/// Trimmed application snapshot.
///
/// Only the fields the analyzer and the listing need are decoded; everything else the provider
/// returns is dropped. Absent list fields decode as empty lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
	/// Provider-assigned client identifier.
	pub client_id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Application type (`spa`, `native`, `regular_web`, `non_interactive`, ...).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub app_type: Option<String>,
	/// Allowed callback URLs.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub callbacks: Vec<String>,
	/// Allowed web origins.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub web_origins: Vec<String>,
	/// Allowed CORS origins.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub allowed_origins: Vec<String>,
	/// Allowed logout URLs.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub allowed_logout_urls: Vec<String>,
	/// Enabled grant types.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub grant_types: Vec<String>,
	/// Token signing configuration.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub jwt_configuration: Option<JwtConfiguration>,
}
impl Application {
	/// Returns `true` when `app_type` is exactly `spa`.
	pub fn is_spa(&self) -> bool {
		self.app_type.as_deref() == Some(SPA_APP_TYPE)
	}

	/// Exact-match membership test against `callbacks`.
	pub fn allows_callback(&self, url: &str) -> bool {
		self.callbacks.iter().any(|callback| callback == url)
	}

	/// Exact-match membership test against `grant_types`.
	pub fn has_grant(&self, grant: &str) -> bool {
		self.grant_types.iter().any(|value| value == grant)
	}
}

/// Application type expected for browser-based webapps.
pub const SPA_APP_TYPE: &str = "spa";

/// Grant type required by browser-based login flows.
pub const AUTHORIZATION_CODE_GRANT: &str = "authorization_code";

/// Signing settings attached to an application.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtConfiguration {
	/// Signing algorithm.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub alg: Option<String>,
	/// ID token lifetime in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lifetime_in_seconds: Option<u64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
