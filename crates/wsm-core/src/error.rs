//! Error types for the WatchSoMuch provider
//!
//! Only fetch-level and configuration failures surface as errors. Missing or
//! malformed fields inside a page never do: they drop the single item or fall
//! back to a default. WsmError implements Serialize for Tauri compatibility.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for WatchSoMuch provider operations
#[derive(Error, Debug)]
pub enum WsmError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Rate limited by the server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Requested page was not found (HTTP 404)
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Caller supplied an unusable request (empty query, unknown main page)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Site configuration could not be loaded
    #[error("Invalid site configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// No registered extractor accepts the embed URL
    #[error("No extractor for embed: {0}")]
    NoExtractor(String),

    /// A delegated extractor failed
    #[error("Extractor failed: {0}")]
    Extractor(String),
}

/// Serialize WsmError as a string for Tauri compatibility
impl Serialize for WsmError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for WatchSoMuch provider operations
pub type Result<T> = std::result::Result<T, WsmError>;
