//! Error types for pulse-api.

use thiserror::Error;

/// API client error types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport or body-decode failure from the HTTP client.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status from the backend.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Result type alias for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
