//! Issued management credentials and their validity window.

// self
use crate::{_prelude::*, auth::Secret};

/// Safety margin subtracted from the provider-declared lifetime.
pub const EXPIRY_MARGIN: Duration = Duration::seconds(60);

/// Raw result of a client-credentials exchange, before it is anchored to an issue instant.
#[derive(Clone, Debug)]
pub struct IssuedToken {
	/// Bearer token returned by the token endpoint.
	pub access_token: Secret,
	/// Provider-declared lifetime (`expires_in`).
	pub expires_in: Duration,
}
impl IssuedToken {
	/// Creates a new issued token.
	pub fn new(access_token: impl Into<String>, expires_in: Duration) -> Self {
		Self { access_token: Secret::new(access_token), expires_in }
	}
}

/// Bearer credential held by the cache.
#[derive(Clone, Debug)]
pub struct Credential {
	/// Bearer token; callers must avoid logging it.
	pub access_token: Secret,
	/// Instant the exchange completed.
	pub issued_at: OffsetDateTime,
	/// Provider-declared lifetime.
	pub lifetime: Duration,
}
impl Credential {
	/// Anchors an issued token at `issued_at`.
	pub fn issue(token: IssuedToken, issued_at: OffsetDateTime) -> Self {
		Self { access_token: token.access_token, issued_at, lifetime: token.expires_in }
	}

	/// Instant after which the credential must be replaced.
	pub fn expires_at(&self) -> OffsetDateTime {
		self.issued_at + self.lifetime - EXPIRY_MARGIN
	}

	/// Returns `true` while `now` is strictly before [`Credential::expires_at`].
	pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
		now < self.expires_at()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn validity_window_subtracts_margin() {
		let issued_at = datetime!(2025-01-01 00:00 UTC);
		let credential =
			Credential::issue(IssuedToken::new("token", Duration::seconds(3600)), issued_at);

		assert_eq!(credential.expires_at(), datetime!(2025-01-01 00:59 UTC));
		assert!(credential.is_valid_at(issued_at));
		assert!(credential.is_valid_at(datetime!(2025-01-01 00:58:59.999 UTC)));
		assert!(!credential.is_valid_at(datetime!(2025-01-01 00:59 UTC)));
	}

	#[test]
	fn short_lifetimes_are_never_valid() {
		let issued_at = datetime!(2025-01-01 00:00 UTC);
		let credential =
			Credential::issue(IssuedToken::new("token", Duration::seconds(30)), issued_at);

		assert!(!credential.is_valid_at(issued_at));
	}
}
