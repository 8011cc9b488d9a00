//! Stdio entry point: loads configuration, then answers MCP requests until stdin closes.

// crates.io
use color_eyre::Result;
// self
use auth0_mcp_debugger::{config::Config, mcp, obs};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	color_eyre::install()?;
	obs::init_tracing()?;

	let config = Config::load()?;

	tracing::info!(domain = %config.domain, "starting Auth0 MCP server");

	let server = mcp::Auth0McpServer::new(config)?;

	mcp::serve_stdio(&server).await?;

	Ok(())
}
