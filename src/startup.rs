//! Server details and transport selection
//!
//! Both MCP servers share the same startup path: describe the server, pick a
//! transport from config, run until the client disconnects.

use anyhow::{anyhow, Result};
use rust_mcp_sdk::mcp_server::{
    hyper_server, server_runtime, HyperServerOptions, ServerHandler, ServerRuntime,
};
use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ServerCapabilities, ServerCapabilitiesResources,
    ServerCapabilitiesTools, LATEST_PROTOCOL_VERSION,
};
use rust_mcp_sdk::{McpServer, StdioTransport, TransportOptions};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::{ServerConfig, TransportKind};

pub const SQL_SERVER_NAME: &str = "kestrel-sql";
pub const STORES_SERVER_NAME: &str = "kestrel-stores";

pub const SQL_INSTRUCTIONS: &str = r#"# Kestrel SQL tools

Tools over a single SQLite database:
- `list_tables` / `get_table_structure` to discover the schema
- `execute_query` for arbitrary SQL; pass `params` as a JSON array (positional `?`) or object (named `:name`)
- `insert_data`, `update_data`, `delete_data` for templated writes; `data` is a JSON object of column values

Every tool answers with text. Failures come back as `Error: <message>` instead of protocol errors.
Table schemas are also readable as resources at `tables://{table_name}/schema`.
"#;

pub const STORES_INSTRUCTIONS: &str = r#"# Kestrel store headcount tools

Track staff per store with `add_user`, `user_leave` and `store_info`.
Store names are case-insensitive.
"#;

/// Initialize response advertised by a kestrel server
pub fn server_details(
    name: &str,
    title: &str,
    instructions: &str,
    with_resources: bool,
) -> InitializeResult {
    InitializeResult {
        server_info: Implementation {
            name: name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            title: Some(title.to_string()),
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            resources: with_resources.then_some(ServerCapabilitiesResources {
                list_changed: None,
                subscribe: None,
            }),
            ..Default::default()
        },
        meta: None,
        instructions: Some(instructions.to_string()),
        protocol_version: LATEST_PROTOCOL_VERSION.to_string(),
    }
}

/// Run `handler` on the configured transport until the session ends
pub async fn serve<H>(details: InitializeResult, handler: H, config: &ServerConfig) -> Result<()>
where
    H: ServerHandler + 'static,
{
    info!("📋 Server configuration:");
    info!("  Name: {}", details.server_info.name);
    info!("  Version: {}", details.server_info.version);
    info!("  Protocol: {}", details.protocol_version);
    info!("  Transport: {}", config.transport);

    match config.transport {
        TransportKind::Stdio => {
            let transport = StdioTransport::new(TransportOptions::default())
                .map_err(|e| anyhow!("Failed to open stdio transport: {}", e))?;
            debug!("✓ STDIO transport initialized");

            let server: Arc<ServerRuntime> =
                server_runtime::create_server(details, transport, handler);

            info!("🔥 Starting MCP server on stdio...");
            server.start().await.map_err(|e| {
                error!("❌ Server failed: {}", e);
                anyhow!("MCP server error: {}", e)
            })?;
        }
        TransportKind::Sse => {
            let server = hyper_server::create_server(
                details,
                handler,
                HyperServerOptions {
                    host: config.host.clone(),
                    port: config.port,
                    sse_support: true,
                    ..Default::default()
                },
            );

            info!("🔥 Starting MCP server on http://{}:{} (SSE)", config.host, config.port);
            server.start().await.map_err(|e| {
                error!("❌ Server failed: {}", e);
                anyhow!("MCP server error: {}", e)
            })?;
        }
    }

    info!("🏁 Server stopped");
    Ok(())
}
