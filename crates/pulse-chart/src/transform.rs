//! Pivot activity rows into a renderable dataset.

use chrono::NaiveDateTime;
use pulse_core::format::hour_label;
use pulse_core::ActivityRow;
use std::collections::{BTreeMap, BTreeSet};

/// Fixed palette keyed by the known source tags.
const PALETTE: &[(&str, &str)] = &[
    ("reddit", "#ff4500"),
    ("twitter", "#1da1f2"),
    ("news", "#10b981"),
];

/// Color for any source tag outside the palette.
pub const FALLBACK_COLOR: &str = "#9ca3af";

/// Stable color for a source tag.
pub fn source_color(tag: &str) -> &'static str {
    PALETTE
        .iter()
        .find(|(known, _)| *known == tag)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

/// One dense series aligned to the shared axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSeries {
    pub source: String,
    pub color: &'static str,
    /// Exactly one entry per axis position, zero-filled.
    pub points: Vec<u64>,
}

/// The derived chart input: a shared label axis plus one series per
/// observed source. Never persisted; rebuilt on every activity fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartDataset {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// Pivot the flat activity rows into a [`ChartDataset`].
///
/// The axis is the strictly ascending union of all hour buckets across
/// all sources; each source's series is looked up per axis hour with
/// zero substituted where the source had no activity. Series are ordered
/// by source tag so the output is deterministic. Pure and idempotent.
pub fn build_dataset(rows: &[ActivityRow]) -> ChartDataset {
    let mut axis: BTreeSet<NaiveDateTime> = BTreeSet::new();
    let mut per_source: BTreeMap<&str, BTreeMap<NaiveDateTime, u64>> = BTreeMap::new();

    for row in rows {
        axis.insert(row.hour);
        *per_source
            .entry(row.source.as_str())
            .or_default()
            .entry(row.hour)
            .or_default() += row.count;
    }

    let axis: Vec<NaiveDateTime> = axis.into_iter().collect();
    let labels = axis.iter().copied().map(hour_label).collect();

    let series = per_source
        .into_iter()
        .map(|(source, sparse)| ChartSeries {
            source: source.to_string(),
            color: source_color(source),
            points: axis
                .iter()
                .map(|hour| sparse.get(hour).copied().unwrap_or(0))
                .collect(),
        })
        .collect();

    ChartDataset { labels, series }
}
