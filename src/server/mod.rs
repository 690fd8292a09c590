//! HTTP server for blog records
//!
//! Exposes the blog store and list statistics as a JSON REST API.
//!
//! # Routes
//!
//! - `GET /health` - Liveness probe
//! - `GET /api/blogs` - List all blogs in insertion order
//! - `POST /api/blogs` - Create a blog (201, or 400 on invalid input)
//! - `GET /api/blogs/stats` - Aggregated statistics over all blogs
//! - `GET /api/blogs/{id}` - Fetch one blog
//! - `PUT /api/blogs/{id}` - Update the like count (body: `{"likes": n}`)
//! - `DELETE /api/blogs/{id}` - Delete a blog (204)
//!
//! Every response carries `Access-Control-Allow-Origin: *` and every request
//! is logged at info level. POST and PUT bodies are logged at debug level.
//!
//! # Example
//!
//! ```no_run
//! use bloglist::server::BlogServer;
//! use bloglist::storage::{BlogStore, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = BlogStore::new(StoreConfig::default()).expect("Failed to open store");
//!     BlogServer::new(store)
//!         .run("127.0.0.1:3003")
//!         .await
//!         .expect("Server failed");
//! }
//! ```

mod error;
mod handlers;
mod middleware;

pub use error::{ApiError, ErrorResponse};

use crate::config::AppConfig;
use crate::storage::BlogStore;
use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Default request body limit (1 MiB)
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bind error: {0}")]
    Bind(String),
}

/// Shared server state
pub(crate) struct AppState {
    pub(crate) store: Mutex<BlogStore>,
}

/// HTTP server for blog records
pub struct BlogServer {
    state: Arc<AppState>,
    max_body_size: usize,
}

impl BlogServer {
    /// Create a server over an opened store
    pub fn new(store: BlogStore) -> Self {
        Self {
            state: Arc::new(AppState {
                store: Mutex::new(store),
            }),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Open the configured store and build a server around it
    pub fn from_config(config: &AppConfig) -> crate::Result<Self> {
        let store = BlogStore::new(config.store_config())?;
        Ok(Self::new(store).with_max_body_size(config.server.max_body_size))
    }

    /// Override the request body limit
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    /// Build the router with logging and CORS middleware
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/api/blogs",
                get(handlers::list_blogs).post(handlers::create_blog),
            )
            .route("/api/blogs/stats", get(handlers::blog_stats))
            .route(
                "/api/blogs/{id}",
                get(handlers::get_blog)
                    .put(handlers::update_likes)
                    .delete(handlers::delete_blog),
            )
            .fallback(handlers::unknown_endpoint)
            .layer(DefaultBodyLimit::max(self.max_body_size))
            .layer(axum::middleware::from_fn(middleware::cors))
            .layer(axum::middleware::from_fn(middleware::log_requests))
            .with_state(self.state.clone())
    }

    /// Run the server on the given address
    pub async fn run(self, addr: &str) -> Result<(), ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(format!("{}: {}", addr, e)))?;

        tracing::info!(
            addr = addr,
            max_body_size = self.max_body_size,
            "Blog server listening"
        );

        axum::serve(listener, self.router())
            .await
            .map_err(ServerError::Io)
    }

    /// Get a reference to the store (for seeding and tests)
    pub fn store(&self) -> &Mutex<BlogStore> {
        &self.state.store
    }
}
