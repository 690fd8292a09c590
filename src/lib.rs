//! Bloglist - blog records over HTTP with list statistics
//!
//! Stores blog metadata (title, author, url, likes) in SQLite, serves it
//! through a small REST API and computes summary statistics over blog lists.
//!
//! # Architecture
//!
//! - **blog**: Core data structures (BlogRecord, BlogId, NewBlog)
//! - **aggregator**: Pure statistics over blog sequences
//! - **storage**: SQLite persistence
//! - **server**: HTTP API (axum)
//! - **config**: Configuration file and environment overrides

// Core modules
pub mod aggregator;
pub mod blog;
pub mod config;
pub mod error;
pub mod logging;
pub mod storage;

// Components
pub mod server;

// Re-exports
pub use error::{BlogListError, Result};
