//! Error types for Bloglist
//!
//! Defines the crate-wide error enum covering database, configuration,
//! validation and aggregation failures. Uses thiserror for ergonomic error handling.

use crate::aggregator::AggregateError;
use crate::blog::ValidationError;
use thiserror::Error;

/// Result type alias for Bloglist operations
pub type Result<T> = std::result::Result<T, BlogListError>;

/// Comprehensive error type for Bloglist operations
#[derive(Error, Debug)]
pub enum BlogListError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No blog with the given id
    #[error("Blog not found: {0}")]
    NotFound(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// SQLite database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Rejected blog input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Statistics over an unusable blog list
    #[error("Aggregation error: {0}")]
    Aggregate(#[from] AggregateError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
