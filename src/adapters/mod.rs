// Adapters layer: concrete implementations for external systems (Reddit HTTP API, MCP stdio)

pub mod http;
pub mod mcp;

pub use http::{Credentials, RedditApiConfig, RedditHttpClient};
pub use mcp::{McpServer, ServerIdentity};
