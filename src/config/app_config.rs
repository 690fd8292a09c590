//! Bloglist configuration file handling
//!
//! Loads and manages the ~/.config/bloglist/config.yaml file. Environment
//! variables override file values so deployments can configure the service
//! without a file at all.

use crate::storage::StoreConfig;
use crate::{BlogListError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Port override
pub const ENV_PORT: &str = "PORT";
/// Bind address override
pub const ENV_HOST: &str = "BLOGLIST_HOST";
/// Database path override
pub const ENV_DB: &str = "BLOGLIST_DB";

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request body size limit in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3003
}

fn default_max_body_size() -> usize {
    crate::server::DEFAULT_MAX_BODY_SIZE
}

impl ServerConfig {
    /// `host:port` string for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_size: default_max_body_size(),
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Enable WAL journal mode
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

fn default_db_path() -> PathBuf {
    StoreConfig::default().path
}

fn default_wal_mode() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

impl From<&StorageConfig> for StoreConfig {
    fn from(config: &StorageConfig) -> Self {
        Self {
            path: config.path.clone(),
            wal_mode: config.wal_mode,
        }
    }
}

/// Bloglist configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Create a configuration with every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the default path (~/.config/bloglist/config.yaml)
    pub fn load_default() -> Result<Self> {
        Self::load(Self::default_path())
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(BlogListError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading bloglist configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        tracing::debug!(
            port = config.server.port,
            db = %config.storage.path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Load from an explicit path, or from the default path if it exists
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file silently yields the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                if Self::default_path().exists() {
                    Self::load_default()
                } else {
                    tracing::debug!("No config file, using defaults");
                    Ok(Self::new())
                }
            }
        }
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving bloglist configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Get the default config path (~/.config/bloglist/config.yaml)
    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push("bloglist");
        path.push("config.yaml");
        path
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| {
                BlogListError::Config(format!("{} is not a valid port: {}", ENV_PORT, port))
            })?;
        }

        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }

        if let Some(db) = lookup(ENV_DB) {
            self.storage.path = PathBuf::from(db);
        }

        Ok(())
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(BlogListError::Config("server.host must not be empty".into()));
        }
        if self.server.max_body_size == 0 {
            return Err(BlogListError::Config(
                "server.max_body_size must be greater than zero".into(),
            ));
        }
        if self.storage.path.as_os_str().is_empty() {
            return Err(BlogListError::Config("storage.path must not be empty".into()));
        }
        Ok(())
    }

    /// Store settings derived from this configuration
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::from(&self.storage)
    }
}
