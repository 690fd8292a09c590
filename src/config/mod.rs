//! Configuration system
//!
//! Loads ~/.config/bloglist/config.yaml with support for:
//! - HTTP bind address, port and body size limit
//! - Database location and journal mode
//! - Environment overrides (`PORT`, `BLOGLIST_HOST`, `BLOGLIST_DB`)

mod app_config;

pub use app_config::{AppConfig, ServerConfig, StorageConfig, ENV_DB, ENV_HOST, ENV_PORT};
