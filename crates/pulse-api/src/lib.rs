//! REST client and fetch orchestration.
//!
//! `ApiClient` wraps the dashboard backend's REST endpoints; the
//! `FetchOrchestrator` fans out the six view queries in parallel, isolates
//! per-query failures, and writes each result into the state store.

pub mod client;
pub mod error;
pub mod orchestrator;

pub use client::{post_query, trend_query, ApiClient, QueryConfig};
pub use error::{ApiError, ApiResult};
pub use orchestrator::FetchOrchestrator;
