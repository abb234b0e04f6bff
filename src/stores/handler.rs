use async_trait::async_trait;
use rust_mcp_sdk::schema::{
    schema_utils::CallToolError, CallToolRequest, CallToolResult, ListResourceTemplatesRequest,
    ListResourceTemplatesResult, ListToolsRequest, ListToolsResult, ReadResourceRequest,
    ReadResourceResult, ReadResourceResultContentsItem, ResourceTemplate, RpcError,
    TextResourceContents,
};
use rust_mcp_sdk::{mcp_server::ServerHandler, McpServer};
use std::sync::Arc;
use tracing::{debug, error};

use super::StoreRegistry;
use crate::resources::{parse_greeting_uri, GREETING_TEMPLATE};
use crate::tools::StoreTools;

/// MCP handler for the store headcount server
pub struct StoreServerHandler {
    registry: Arc<StoreRegistry>,
}

impl StoreServerHandler {
    pub fn new(registry: Arc<StoreRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &StoreRegistry {
        &self.registry
    }

    pub fn greeting(name: &str) -> String {
        format!("Hello, {}! this is store manage", name)
    }
}

#[async_trait]
impl ServerHandler for StoreServerHandler {
    async fn handle_list_tools_request(
        &self,
        _request: ListToolsRequest,
        _runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            meta: None,
            next_cursor: None,
            tools: StoreTools::tools(),
        })
    }

    async fn handle_call_tool_request(
        &self,
        request: CallToolRequest,
        _runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        debug!("🛠️  Executing tool: {}", request.params.name);

        let tool: StoreTools = StoreTools::try_from(request.params).map_err(|e| {
            error!("❌ Failed to parse tool parameters: {}", e);
            CallToolError::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid tool parameters: {}", e),
            ))
        })?;

        let registry = self.registry.as_ref();
        Ok(match &tool {
            StoreTools::AddUserTool(tool) => tool.call_tool(registry),
            StoreTools::UserLeaveTool(tool) => tool.call_tool(registry),
            StoreTools::StoreInfoTool(tool) => tool.call_tool(registry),
        })
    }

    async fn handle_list_resource_templates_request(
        &self,
        _request: ListResourceTemplatesRequest,
        _runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<ListResourceTemplatesResult, RpcError> {
        Ok(ListResourceTemplatesResult {
            meta: None,
            next_cursor: None,
            resource_templates: vec![ResourceTemplate {
                annotations: None,
                description: Some("Personalized greeting".to_string()),
                meta: None,
                mime_type: Some("text/plain".to_string()),
                name: "greeting".to_string(),
                title: None,
                uri_template: GREETING_TEMPLATE.to_string(),
            }],
        })
    }

    async fn handle_read_resource_request(
        &self,
        request: ReadResourceRequest,
        _runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<ReadResourceResult, RpcError> {
        let uri = request.params.uri;
        let name = parse_greeting_uri(&uri).ok_or_else(|| {
            RpcError::invalid_params().with_message(format!("Unknown resource URI: {}", uri))
        })?;

        Ok(ReadResourceResult {
            meta: None,
            contents: vec![ReadResourceResultContentsItem::TextResourceContents(
                TextResourceContents {
                    meta: None,
                    mime_type: Some("text/plain".to_string()),
                    text: Self::greeting(name),
                    uri: uri.clone(),
                },
            )],
        })
    }
}
