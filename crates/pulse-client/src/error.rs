//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(#[from] pulse_api::ApiError),

    #[error("Stream error: {0}")]
    Stream(#[from] pulse_stream::StreamError),
}

pub type AppResult<T> = Result<T, AppError>;
