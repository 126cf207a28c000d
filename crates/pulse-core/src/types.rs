//! Wire types for the dashboard backend API.
//!
//! These mirror the JSON payloads served by the REST endpoints. Every
//! collection is replaced wholesale on fetch; nothing here is patched
//! incrementally.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single scraped post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: i64,
    /// Source tag (e.g., "reddit", "twitter", "news"). Open set.
    pub source: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub author: String,
    pub title: String,
    /// Body text, truncated by the backend.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub subreddit: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: i64,
    #[serde(default)]
    pub engagement_score: f64,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scraped_at: Option<DateTime<Utc>>,
}

/// Per-source slice of the aggregate stats.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PerSourceStats {
    pub count: u64,
    #[serde(default)]
    pub avg_engagement: f64,
}

/// Aggregate post counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    pub total_posts: u64,
    pub posts_today: u64,
    #[serde(default)]
    pub avg_engagement: f64,
    #[serde(default)]
    pub per_source: HashMap<String, PerSourceStats>,
}

/// A trending keyword with its mention frequency.
///
/// The backend returns trends ordered descending by `mention_count`,
/// bounded to the requested top-N.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendTopic {
    pub topic: String,
    pub source: String,
    pub mention_count: u64,
    #[serde(default)]
    pub avg_engagement: f64,
    #[serde(default)]
    pub first_seen: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
}

/// Health bucket derived from a source's success rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceHealth {
    Ok,
    Degraded,
    Failing,
}

/// Per-source scraping health snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceStat {
    pub source: String,
    pub total_runs: u64,
    /// Percentage of successful runs, 0-100.
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_items: u64,
}

impl SourceStat {
    /// Derive a coarse health status from the success rate.
    pub fn health(&self) -> SourceHealth {
        if self.success_rate >= 80.0 {
            SourceHealth::Ok
        } else if self.success_rate > 0.0 {
            SourceHealth::Degraded
        } else {
            SourceHealth::Failing
        }
    }
}

/// Outcome of a scrape run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Partial,
    Failed,
}

/// A historical scrape execution record, newest-first from the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Run {
    pub id: i64,
    pub source: String,
    pub status: RunStatus,
    #[serde(default)]
    pub items_scraped: u64,
    #[serde(default)]
    pub items_new: u64,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub duration_seconds: f64,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

/// One (source, hour bucket, count) tuple of raw chart input.
///
/// The hour bucket is a UTC timestamp truncated to the top of the hour,
/// serialized by the backend as `%Y-%m-%dT%H:00:00` without an offset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityRow {
    pub source: String,
    #[serde(with = "hour_bucket")]
    pub hour: NaiveDateTime,
    pub count: u64,
}

/// Serde adapter for the backend's naive hour-bucket format.
pub mod hour_bucket {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
