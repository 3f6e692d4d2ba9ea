//! Reddit operations exposed as MCP tools.
//!
//! Every tool returns the same envelope, `{"successful", "data", "error"}`. The platform
//! client is injected through [`domain::ports::RedditClient`], so operations can run
//! against the real HTTP API or any other implementation.

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{McpServer, RedditHttpClient};
pub use config::RedditSettings;
pub use core::{Envelope, RedditToolkit, ToolRegistry};
pub use domain::ports::RedditClient;
pub use utils::error::{RedditError, Result};
