//! MCP tool server built on `rmcp`.
//!
//! `tools/list` publishes the catalogue. `tools/call` runs one operation to
//! completion and answers with its envelope, as text and as structured content.
//! Only unknown tool names become protocol errors.

use crate::core::envelope::Envelope;
use crate::core::registry::ToolRegistry;
use crate::domain::ports::RedditClient;
use crate::utils::error::{RedditError, Result};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam,
    ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, ServerHandler, ServiceExt};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

const INSTRUCTIONS: &str = "Reddit tools. Every call returns {successful, data, error}; \
     failures carry an empty data object and a human readable error.";

/// 對外公布的伺服器名稱與版本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
}

impl Default for ServerIdentity {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

pub struct McpServer<C: RedditClient> {
    registry: Arc<ToolRegistry<C>>,
    identity: ServerIdentity,
}

impl<C: RedditClient> Clone for McpServer<C> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            identity: self.identity.clone(),
        }
    }
}

impl<C: RedditClient + 'static> McpServer<C> {
    pub fn new(registry: ToolRegistry<C>, identity: ServerIdentity) -> Self {
        Self {
            registry: Arc::new(registry),
            identity,
        }
    }

    pub fn identity(&self) -> &ServerIdentity {
        &self.identity
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.registry.definitions()
    }

    /// Runs one tool. Missing arguments count as an empty object.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let arguments = Value::Object(arguments.unwrap_or_default());
        match self.registry.call(name, &arguments).await {
            Ok(envelope) => Ok(tool_result(&envelope)),
            Err(unknown) => {
                debug!("Rejected call to {}", name);
                Err(McpError::invalid_params(unknown.to_string(), None))
            }
        }
    }

    /// Serves one session on stdin/stdout until the client goes away.
    pub async fn serve_stdio(self) -> Result<()> {
        info!(
            "🚀 {} v{} listening on stdio ({} tools)",
            self.identity.name,
            self.identity.version,
            self.registry.definitions().len()
        );
        let session = self
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| RedditError::Transport {
                message: e.to_string(),
            })?;
        let reason = session.waiting().await.map_err(|e| RedditError::Transport {
            message: e.to_string(),
        })?;
        info!("👋 Session closed: {:?}", reason);
        Ok(())
    }
}

impl<C: RedditClient + 'static> ServerHandler for McpServer<C> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.identity.name.clone(),
                version: self.identity.version.clone(),
                ..Implementation::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        self.call(&request.name, request.arguments).await
    }
}

/// `tools/call` result: `isError` mirrors a failed envelope.
pub fn tool_result(envelope: &Envelope) -> CallToolResult {
    let structured = json!({
        "successful": envelope.successful,
        "data": envelope.data,
        "error": envelope.error,
    });
    if envelope.successful {
        CallToolResult::structured(structured)
    } else {
        CallToolResult::structured_error(structured)
    }
}
