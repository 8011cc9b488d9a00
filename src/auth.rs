//! Management-token model: redacted secrets, issued credentials, and the single-slot cache.

pub mod cache;
pub mod credential;
pub mod secret;

pub use cache::*;
pub use credential::*;
pub use secret::*;
