//! Single-slot management-token cache.
//!
//! The cache owns at most one [`Credential`]. [`CredentialCache::acquire`] takes the current
//! instant explicitly so expiry decisions stay testable, and holds the slot lock across the
//! exchange so overlapping callers share one token request instead of racing the endpoint.

// self
use crate::{
	_prelude::*,
	auth::{Credential, IssuedToken, Secret},
	error::AuthenticationError,
};

/// Holds the live management credential, if any.
pub struct CredentialCache {
	slot: AsyncMutex<Option<Credential>>,
}
impl CredentialCache {
	/// Creates an empty cache.
	pub fn new() -> Self {
		Self { slot: AsyncMutex::new(None) }
	}

	/// Returns the cached bearer token when still valid at `now`, otherwise runs `exchange` and
	/// caches its result anchored at `now`.
	///
	/// An expired credential is discarded before the exchange starts; a failed exchange leaves
	/// the slot empty.
	pub async fn acquire<F, Fut>(
		&self,
		now: OffsetDateTime,
		exchange: F,
	) -> Result<Secret, AuthenticationError>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<IssuedToken, AuthenticationError>>,
	{
		let mut slot = self.slot.lock().await;

		if let Some(current) = slot.as_ref().filter(|credential| credential.is_valid_at(now)) {
			tracing::trace!(expires_at = %current.expires_at(), "reusing cached management token");

			return Ok(current.access_token.clone());
		}

		*slot = None;

		let credential = Credential::issue(exchange().await?, now);
		let token = credential.access_token.clone();

		tracing::debug!(expires_at = %credential.expires_at(), "cached new management token");

		*slot = Some(credential);

		Ok(token)
	}

	/// Returns a snapshot of the cached credential.
	pub async fn current(&self) -> Option<Credential> {
		self.slot.lock().await.clone()
	}

	/// Drops the cached credential.
	pub async fn clear(&self) {
		*self.slot.lock().await = None;
	}
}
impl Default for CredentialCache {
	fn default() -> Self {
		Self::new()
	}
}
impl Debug for CredentialCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialCache").finish_non_exhaustive()
	}
}
