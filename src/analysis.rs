//! Webapp/API application configuration analyzer.
//!
//! [`analyze`] is a pure function: it never performs I/O and never fails. It walks a fixed rule
//! list and appends issues (and, where one applies, a matching recommendation) in rule order:
//!
//! 1. webapp not found; the remaining webapp rules are skipped,
//! 2. webapp type is not `spa`,
//! 3. expected callback URL missing from the webapp's allowed callbacks,
//! 4. Authorization Code grant not enabled on the webapp,
//! 5. API client id supplied but not found,
//! 6. webapp and API share one client id.
//!
//! Ids, callback URLs, and grant types are compared as exact strings.

// crates.io
use serde::ser::{SerializeMap, Serializer};
// self
use crate::{
	_prelude::*,
	management::{AUTHORIZATION_CODE_GRANT, Application, SPA_APP_TYPE},
};

/// Outcome of looking up one application by client id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApplicationLookup {
	/// Record located; the snapshot is echoed back.
	Found(Application),
	/// Id supplied but unmatched. `searched_for` is echoed for the API side only.
	NotFound {
		/// Id that was searched for, when echoed.
		searched_for: Option<String>,
	},
	/// No id supplied.
	NotProvided,
}
impl ApplicationLookup {
	/// Returns the located record, if any.
	pub fn application(&self) -> Option<&Application> {
		match self {
			Self::Found(application) => Some(application),
			_ => None,
		}
	}
}
impl Serialize for ApplicationLookup {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Self::Found(app) => {
				let mut map = serializer.serialize_map(Some(9))?;

				map.serialize_entry("found", &true)?;
				map.serialize_entry("client_id", &app.client_id)?;
				map.serialize_entry("name", &app.name)?;
				map.serialize_entry("app_type", &app.app_type)?;
				map.serialize_entry("callbacks", &app.callbacks)?;
				map.serialize_entry("allowed_origins", &app.allowed_origins)?;
				map.serialize_entry("web_origins", &app.web_origins)?;
				map.serialize_entry("allowed_logout_urls", &app.allowed_logout_urls)?;
				map.serialize_entry("grant_types", &app.grant_types)?;
				map.end()
			},
			Self::NotFound { searched_for: None } => {
				let mut map = serializer.serialize_map(Some(1))?;

				map.serialize_entry("found", &false)?;
				map.end()
			},
			Self::NotFound { searched_for: Some(id) } => {
				let mut map = serializer.serialize_map(Some(2))?;

				map.serialize_entry("found", &false)?;
				map.serialize_entry("searched_for", id)?;
				map.end()
			},
			Self::NotProvided => {
				let mut map = serializer.serialize_map(Some(1))?;

				map.serialize_entry("not_provided", &true)?;
				map.end()
			},
		}
	}
}

/// Structured analysis result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfigurationAnalysis {
	/// Webapp lookup outcome.
	pub webapp_application: ApplicationLookup,
	/// API lookup outcome.
	pub api_application: ApplicationLookup,
	/// Detected issues, in rule order.
	pub issues: Vec<String>,
	/// Recommendations, in the order of the issues that produced them.
	pub recommendations: Vec<String>,
}
impl ConfigurationAnalysis {
	/// Returns `true` when no rule fired.
	pub fn is_clean(&self) -> bool {
		self.issues.is_empty()
	}

	fn flag(&mut self, issue: String, recommendation: Option<String>) {
		self.issues.push(issue);
		self.recommendations.extend(recommendation);
	}
}

/// Applies the rule set to the supplied records.
///
/// `webapp` and `api` are the records matched for `webapp_client_id` and `api_client_id`
/// (`None` when unmatched). `api_client_id` and `expected_callback` are optional inputs.
pub fn analyze(
	webapp_client_id: &str,
	webapp: Option<&Application>,
	api_client_id: Option<&str>,
	api: Option<&Application>,
	expected_callback: Option<&str>,
) -> ConfigurationAnalysis {
	let mut analysis = ConfigurationAnalysis {
		webapp_application: match webapp {
			Some(app) => ApplicationLookup::Found(app.clone()),
			None => ApplicationLookup::NotFound { searched_for: None },
		},
		api_application: match (api_client_id, api) {
			(None, _) => ApplicationLookup::NotProvided,
			(Some(_), Some(app)) => ApplicationLookup::Found(app.clone()),
			(Some(id), None) => ApplicationLookup::NotFound { searched_for: Some(id.to_owned()) },
		},
		issues: Vec::new(),
		recommendations: Vec::new(),
	};

	match webapp {
		None => analysis
			.flag(format!("Webapp client ID {webapp_client_id} not found in Auth0 tenant"), None),
		Some(app) => check_webapp(&mut analysis, app, expected_callback),
	}

	if let Some(api_id) = api_client_id {
		if api.is_none() {
			analysis.flag(format!("API client ID {api_id} not found in Auth0 tenant"), None);
		}
		if api_id == webapp_client_id {
			analysis.flag(
				format!("Webapp and API use the same client ID ({api_id})"),
				Some(
					"Use separate Auth0 applications for the webapp and the API, or verify that the \
					 shared application is configured for both roles"
						.into(),
				),
			);
		}
	}

	analysis
}

/// Locates both records in a tenant listing by exact client id, then runs [`analyze`].
pub fn analyze_tenant(
	applications: &[Application],
	webapp_client_id: &str,
	api_client_id: Option<&str>,
	expected_callback: Option<&str>,
) -> ConfigurationAnalysis {
	let find = |id: &str| applications.iter().find(|app| app.client_id == id);

	analyze(
		webapp_client_id,
		find(webapp_client_id),
		api_client_id,
		api_client_id.and_then(find),
		expected_callback,
	)
}

fn check_webapp(analysis: &mut ConfigurationAnalysis, app: &Application, expected_callback: Option<&str>) {
	if !app.is_spa() {
		let actual = app.app_type.as_deref().unwrap_or("unset");

		analysis.flag(
			format!("Webapp application type is '{actual}' but should be '{SPA_APP_TYPE}'"),
			Some("Change the webapp application type to Single Page Application (spa)".into()),
		);
	}
	if let Some(callback) = expected_callback.filter(|url| !app.allows_callback(url)) {
		analysis.flag(
			format!("Callback URL {callback} is not in the webapp's allowed callbacks"),
			Some(format!("Add {callback} to the webapp's Allowed Callback URLs")),
		);
	}
	if !app.has_grant(AUTHORIZATION_CODE_GRANT) {
		analysis.flag(
			"Authorization Code grant type not enabled".into(),
			Some("Enable the Authorization Code grant type for the webapp application".into()),
		);
	}
}
