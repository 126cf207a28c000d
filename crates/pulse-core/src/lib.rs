//! Core domain types for the pulse dashboard client.
//!
//! This crate provides the types shared across the sync layer:
//! - Wire types mirroring the backend JSON (`Post`, `Stats`, `TrendTopic`, ...)
//! - `SourceFilter` / `FilterState`: the active view filters
//! - Display formatters for counts, relative times, and hour labels

pub mod filter;
pub mod format;
pub mod types;

pub use filter::{FilterState, SourceFilter};
pub use types::{
    ActivityRow, PerSourceStats, Post, Run, RunStatus, SourceHealth, SourceStat, Stats,
    TrendTopic,
};
