// std
use std::io;
// crates.io
use tracing::{Instrument, instrument::Instrumented};
use tracing_subscriber::{
	EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};
// self
use crate::_prelude::*;

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// Log lines go to stderr; stdout is reserved for protocol messages.
pub fn init_tracing() -> Result<(), TryInitError> {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(io::stderr).with_ansi(false))
		.try_init()
}

/// Span wrapping one tool dispatch.
#[derive(Clone, Debug)]
pub struct ToolSpan {
	span: tracing::Span,
}
impl ToolSpan {
	/// Creates a span tagged with the tool name.
	pub fn new(tool: &str) -> Self {
		Self { span: tracing::info_span!("auth0_mcp.tool", tool) }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		fut.instrument(self.span.clone())
	}
}
