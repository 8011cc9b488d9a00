//! Newline-delimited JSON-RPC over a byte stream.

// std
use std::io;
// crates.io
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
// self
use crate::mcp::server::Auth0McpServer;

/// Serves requests from `reader` until EOF, one line per message.
///
/// Each message is handled to completion before the next line is read; replies are flushed as
/// soon as they are written.
pub async fn serve<R, W>(server: &Auth0McpServer, reader: R, mut writer: W) -> io::Result<()>
where
	R: AsyncBufRead + Unpin,
	W: AsyncWrite + Unpin,
{
	let mut lines = reader.lines();

	while let Some(line) = lines.next_line().await? {
		if line.trim().is_empty() {
			continue;
		}
		if let Some(reply) = server.handle_message(&line).await {
			writer.write_all(reply.as_bytes()).await?;
			writer.write_all(b"\n").await?;
			writer.flush().await?;
		}
	}

	tracing::info!("input closed, shutting down");

	Ok(())
}

/// Serves requests from the process's stdin, replying on stdout.
pub async fn serve_stdio(server: &Auth0McpServer) -> io::Result<()> {
	serve(server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}
