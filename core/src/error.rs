//! Error types shared by the upstream clients.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures talking to a third-party service.
#[derive(Error, Debug)]
pub enum Error {
    /// Upstream answered with a non-success status
    #[error("Upstream responded with {0}")]
    Status(StatusCode),

    /// Transport failure or unreadable response body
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the JSON we expected
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Outbound request could not be assembled
    #[error("{0}")]
    Request(#[from] async_openai::error::OpenAIError),

    /// Model output that does not parse as JSON once fences are removed
    #[error("Invalid JSON content: {0}")]
    InvalidContent(String),
}
