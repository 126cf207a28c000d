//! Error types for pulse-stream.

use thiserror::Error;

/// Push channel error types.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Transport failure while connecting to or reading the stream.
    #[error("Event stream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The event stream endpoint answered with a non-success status.
    #[error("Event stream returned HTTP {status}")]
    Status { status: u16 },
}

/// Result type alias for channel operations.
pub type StreamResult<T> = std::result::Result<T, StreamError>;
