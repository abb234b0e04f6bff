// kestrel-sql - MCP tool server over a single SQLite database

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use kestrel::config::{KestrelConfig, TransportKind};
use kestrel::handler::SqlServerHandler;
use kestrel::logging::init_logging;
use kestrel::startup::{serve, server_details, SQL_INSTRUCTIONS, SQL_SERVER_NAME};

#[derive(Parser, Debug)]
#[command(name = "kestrel-sql")]
#[command(about = "MCP tool server exposing SQL operations over a SQLite database", long_about = None)]
struct Args {
    /// Config file (defaults to ./kestrel.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the SQLite database file
    #[arg(long)]
    db: Option<String>,

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
    if let Some(db) = args.db {
        config.sql.db_path = db;
    }
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

    info!("🚀 Starting Kestrel SQL tool server");
    info!(
        "📝 Logging to console (stderr) and {}/kestrel.log",
        config.logging.directory.display()
    );

    let store = config.sql.store();
    if config.sql.seed_demo_data {
        let seeded = store
            .bootstrap_if_missing()
            .with_context(|| format!("Failed to initialize {}", store.path().display()))?;
        if seeded {
            info!("✅ Created demo database at {}", store.path().display());
        } else {
            debug!("Using existing database at {}", store.path().display());
        }
    }

    let handler = SqlServerHandler::new(store);
    let details = server_details(
        SQL_SERVER_NAME,
        "Kestrel - SQL Tool Server",
        SQL_INSTRUCTIONS,
        true,
    );

    serve(details, handler, &config.server).await
}
