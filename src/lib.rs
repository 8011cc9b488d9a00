//! Read-only Auth0 tenant inspector exposed to agents over the Model Context Protocol, with a
//! rule-based analyzer that flags common webapp/API application misconfigurations.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod analysis;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod management;
pub mod mcp;
pub mod oauth;
pub mod obs;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
// Only the binary reports through color-eyre.
use color_eyre as _;
#[cfg(test)] use httpmock as _;
