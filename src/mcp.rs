//! Model Context Protocol surface: JSON-RPC envelopes, the tool/resource catalog, request
//! dispatch, and the newline-delimited stdio transport.

pub mod catalog;
pub mod protocol;
pub mod server;
pub mod stdio;

pub use catalog::*;
pub use protocol::*;
pub use server::*;
pub use stdio::*;
