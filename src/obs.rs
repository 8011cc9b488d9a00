//! Observability helpers for tool dispatch.
//!
//! # Feature Flags
//!
//! - Spans named `auth0_mcp.tool` carry the `tool` field and wrap every `tools/call`.
//! - Enable `metrics` to increment the `auth0_mcp_tool_total` counter for every
//!   attempt/success/failure, labeled by `tool` + `outcome`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Outcome labels recorded for each tool call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolOutcome {
	/// Dispatch started.
	Attempt,
	/// Tool returned a normal result.
	Success,
	/// Tool returned an error-flagged result or a protocol fault.
	Failure,
}
impl ToolOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ToolOutcome::Attempt => "attempt",
			ToolOutcome::Success => "success",
			ToolOutcome::Failure => "failure",
		}
	}
}
impl Display for ToolOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
