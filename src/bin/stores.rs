// kestrel-stores - MCP tool server tracking per-store headcounts

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use kestrel::config::{KestrelConfig, TransportKind};
use kestrel::logging::init_logging;
use kestrel::startup::{serve, server_details, STORES_INSTRUCTIONS, STORES_SERVER_NAME};
use kestrel::stores::{StoreRegistry, StoreServerHandler};

#[derive(Parser, Debug)]
#[command(name = "kestrel-stores")]
#[command(about = "MCP tool server tracking users and managers per store", long_about = None)]
struct Args {
    /// Config file (defaults to ./kestrel.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Transport to serve on
    #[arg(long, value_enum)]
    transport: Option<TransportKind>,

    /// Bind host for the SSE transport
    #[arg(long)]
    host: Option<String>,

    /// Bind port for the SSE transport
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = KestrelConfig::load(args.config.as_deref())?;
    if let Some(transport) = args.transport {
        config.server.transport = transport;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let _log_guards = init_logging(&config.logging)?;

    let registry = Arc::new(StoreRegistry::from_seeds(&config.stores.initial));
    info!(
        "🚀 Starting Kestrel store server with stores: {}",
        registry.names().join(", ")
    );

    let handler = StoreServerHandler::new(registry);
    let details = server_details(
        STORES_SERVER_NAME,
        "Kestrel - Store Headcount Server",
        STORES_INSTRUCTIONS,
        true,
    );

    serve(details, handler, &config.server).await
}
