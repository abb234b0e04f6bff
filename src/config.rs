//! Configuration for the kestrel binaries
//!
//! Layering, lowest to highest: built-in defaults, `kestrel.toml`, `KESTREL_*`
//! environment variables, then command-line flags (applied by each binary).

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use crate::database::SqlStore;

pub const DEFAULT_CONFIG_FILE: &str = "kestrel.toml";

pub const ENV_DB_PATH: &str = "KESTREL_DB_PATH";
pub const ENV_TRANSPORT: &str = "KESTREL_TRANSPORT";
pub const ENV_HOST: &str = "KESTREL_HOST";
pub const ENV_PORT: &str = "KESTREL_PORT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KestrelConfig {
    pub sql: SqlConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub stores: StoresConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlConfig {
    pub db_path: String,
    pub busy_timeout_ms: u64,
    /// Create and seed the demo `users` table when the database file is absent
    pub seed_demo_data: bool,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            db_path: "database.sqlite".to_string(),
            busy_timeout_ms: 5000,
            seed_demo_data: true,
        }
    }
}

impl SqlConfig {
    /// Database path with a leading `~` expanded
    pub fn resolved_db_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.db_path).into_owned())
    }

    pub fn store(&self) -> SqlStore {
        SqlStore::new(self.resolved_db_path())
            .with_busy_timeout(Duration::from_millis(self.busy_timeout_ms))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Stdio,
    Sse,
}

impl FromStr for TransportKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "sse" => Ok(Self::Sse),
            other => Err(anyhow!("unknown transport '{}' (expected stdio or sse)", other)),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Sse => write!(f, "sse"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: TransportKind,
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::Stdio,
            host: "0.0.0.0".to_string(),
            port: 8082,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(".kestrel/logs"),
            filter: "kestrel=info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSeed {
    pub name: String,
    #[serde(default)]
    pub user_cnt: u32,
    #[serde(default)]
    pub manager_cnt: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoresConfig {
    pub initial: Vec<StoreSeed>,
}

impl Default for StoresConfig {
    fn default() -> Self {
        Self {
            initial: vec![
                StoreSeed {
                    name: "STORE1".to_string(),
                    user_cnt: 18,
                    manager_cnt: 2,
                },
                StoreSeed {
                    name: "STORE2".to_string(),
                    user_cnt: 20,
                    manager_cnt: 0,
                },
            ],
        }
    }
}

impl KestrelConfig {
    /// Load from `path`, or from `kestrel.toml` in the working directory.
    ///
    /// A missing default file yields the defaults; an explicitly named file
    /// must exist. Environment overrides are applied afterwards.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };

        config.apply_env()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `KESTREL_*` overrides looked up through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db_path) = lookup(ENV_DB_PATH) {
            self.sql.db_path = db_path;
        }
        if let Some(transport) = lookup(ENV_TRANSPORT) {
            self.server.transport = transport
                .parse()
                .with_context(|| format!("Invalid {}", ENV_TRANSPORT))?;
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: '{}'", ENV_PORT, port))?;
        }
        Ok(())
    }
}
