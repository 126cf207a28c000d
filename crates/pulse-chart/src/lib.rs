//! Activity chart pipeline.
//!
//! `transform` pivots raw (source, hour, count) rows into per-source
//! series aligned on a shared sorted hour axis; `render` owns the single
//! live chart instance with an explicit dispose-then-recreate lifecycle.

pub mod render;
pub mod transform;

pub use render::{ChartBackend, ChartInstance, ChartRenderer, LogChartBackend};
pub use transform::{build_dataset, source_color, ChartDataset, ChartSeries, FALLBACK_COLOR};
