use async_trait::async_trait;
use rust_mcp_sdk::schema::{
    schema_utils::CallToolError, CallToolRequest, CallToolResult, ListResourceTemplatesRequest,
    ListResourceTemplatesResult, ListResourcesRequest, ListResourcesResult, ListToolsRequest,
    ListToolsResult, ReadResourceRequest, ReadResourceResult, ReadResourceResultContentsItem,
    Resource, ResourceTemplate, RpcError, TextResourceContents,
};
use rust_mcp_sdk::{mcp_server::ServerHandler, McpServer};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::database::{SqlStore, StoreError, TableSchema};
use crate::resources::{parse_table_schema_uri, table_schema_uri, TABLE_SCHEMA_TEMPLATE};
use crate::tools::SqlTools;

const JSON_MIME: &str = "application/json";

/// MCP handler for the SQL tool server
///
/// Owns the store handle; every tool call and resource read borrows it and
/// opens its own connection.
pub struct SqlServerHandler {
    store: SqlStore,
}

impl SqlServerHandler {
    pub fn new(store: SqlStore) -> Self {
        info!("🔧 SQL handler bound to store {}", store.path().display());
        Self { store }
    }

    pub fn store(&self) -> &SqlStore {
        &self.store
    }

    /// JSON text of the schema addressed by a `tables://{table_name}/schema` URI
    pub async fn read_table_schema(&self, uri: &str) -> Result<String, RpcError> {
        let table = parse_table_schema_uri(uri).ok_or_else(|| {
            RpcError::invalid_params().with_message(format!("Unknown resource URI: {}", uri))
        })?;

        let store = self.store.clone();
        let table = table.to_string();
        let schema: Result<TableSchema, StoreError> =
            tokio::task::spawn_blocking(move || store.table_schema(&table))
                .await
                .unwrap_or_else(|e| Err(StoreError::Task(e.to_string())));

        let schema = schema.map_err(|e| {
            warn!("Schema resource {} unavailable: {}", uri, e);
            RpcError::invalid_params().with_message(e.to_string())
        })?;

        serde_json::to_string_pretty(&schema)
            .map_err(|e| RpcError::internal_error().with_message(e.to_string()))
    }

    /// One concrete schema resource per existing table
    pub async fn table_resources(&self) -> Result<Vec<Resource>, RpcError> {
        let store = self.store.clone();
        let names = tokio::task::spawn_blocking(move || store.table_names())
            .await
            .unwrap_or_else(|e| Err(StoreError::Task(e.to_string())))
            .map_err(|e| RpcError::internal_error().with_message(e.to_string()))?;

        Ok(names
            .into_iter()
            .map(|table| Resource {
                annotations: None,
                description: Some(format!("Column layout of table '{}'", table)),
                meta: None,
                mime_type: Some(JSON_MIME.to_string()),
                size: None,
                title: Some(format!("{} schema", table)),
                uri: table_schema_uri(&table),
                name: table,
            })
            .collect())
    }
}

#[async_trait]
impl ServerHandler for SqlServerHandler {
    async fn handle_list_tools_request(
        &self,
        _request: ListToolsRequest,
        _runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<ListToolsResult, RpcError> {
        let tools = SqlTools::tools();
        debug!("📋 Returning {} SQL tools", tools.len());

        Ok(ListToolsResult {
            meta: None,
            next_cursor: None,
            tools,
        })
    }

    async fn handle_call_tool_request(
        &self,
        request: CallToolRequest,
        _runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        debug!("🛠️  Executing tool: {}", request.params.name);

        let tool: SqlTools = SqlTools::try_from(request.params).map_err(|e| {
            error!("❌ Failed to parse tool parameters: {}", e);
            CallToolError::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid tool parameters: {}", e),
            ))
        })?;

        let store = &self.store;
        let result = match &tool {
            SqlTools::ExecuteQueryTool(tool) => tool.call_tool(store).await,
            SqlTools::GetTableStructureTool(tool) => tool.call_tool(store).await,
            SqlTools::ListTablesTool(tool) => tool.call_tool(store).await,
            SqlTools::InsertDataTool(tool) => tool.call_tool(store).await,
            SqlTools::UpdateDataTool(tool) => tool.call_tool(store).await,
            SqlTools::DeleteDataTool(tool) => tool.call_tool(store).await,
        };

        Ok(result)
    }

    async fn handle_list_resources_request(
        &self,
        _request: ListResourcesRequest,
        _runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<ListResourcesResult, RpcError> {
        Ok(ListResourcesResult {
            meta: None,
            next_cursor: None,
            resources: self.table_resources().await?,
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
                description: Some(
                    "Column descriptors of one table, as JSON (same data as get_table_structure)"
                        .to_string(),
                ),
                meta: None,
                mime_type: Some(JSON_MIME.to_string()),
                name: "table_schema".to_string(),
                title: Some("Table schema".to_string()),
                uri_template: TABLE_SCHEMA_TEMPLATE.to_string(),
            }],
        })
    }

    async fn handle_read_resource_request(
        &self,
        request: ReadResourceRequest,
        _runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<ReadResourceResult, RpcError> {
        let uri = request.params.uri;
        debug!("📖 Reading resource: {}", uri);

        let text = self.read_table_schema(&uri).await?;
        Ok(ReadResourceResult {
            meta: None,
            contents: vec![ReadResourceResultContentsItem::TextResourceContents(
                TextResourceContents {
                    meta: None,
                    mime_type: Some(JSON_MIME.to_string()),
                    text,
                    uri,
                },
            )],
        })
    }
}
