//! HTTP client for the dashboard backend REST API.

use crate::error::{ApiError, ApiResult};
use pulse_core::{ActivityRow, FilterState, Post, Run, SourceStat, Stats, TrendTopic};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fixed query sizes for the view queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Page size for the post list.
    #[serde(default = "default_posts_limit")]
    pub posts_limit: u32,
    /// Top-N bound for the trend list.
    #[serde(default = "default_trends_limit")]
    pub trends_limit: u32,
    /// Recent-N bound for the run history.
    #[serde(default = "default_runs_limit")]
    pub runs_limit: u32,
    /// Hours window for the activity query.
    #[serde(default = "default_activity_window_hours")]
    pub activity_window_hours: u32,
}

fn default_posts_limit() -> u32 {
    50
}

fn default_trends_limit() -> u32 {
    10
}

fn default_runs_limit() -> u32 {
    20
}

fn default_activity_window_hours() -> u32 {
    24
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            posts_limit: default_posts_limit(),
            trends_limit: default_trends_limit(),
            runs_limit: default_runs_limit(),
            activity_window_hours: default_activity_window_hours(),
        }
    }
}

/// Build the post-list query parameters.
///
/// The source parameter is omitted for the unrestricted filter and the
/// search parameter is omitted when the search text is empty.
pub fn post_query(config: &QueryConfig, filter: &FilterState) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("limit", config.posts_limit.to_string()),
        ("sort", "engagement_score".to_string()),
        ("order", "desc".to_string()),
    ];
    if let Some(source) = filter.source.as_param() {
        params.push(("source", source.to_string()));
    }
    if let Some(search) = filter.search_param() {
        params.push(("search", search.to_string()));
    }
    params
}

/// Build the trend-list query parameters.
pub fn trend_query(config: &QueryConfig, filter: &FilterState) -> Vec<(&'static str, String)> {
    let mut params = vec![("limit", config.trends_limit.to_string())];
    if let Some(source) = filter.source.as_param() {
        params.push(("source", source.to_string()));
    }
    params
}

/// Client for the dashboard backend REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    config: QueryConfig,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Arguments
    /// * `base_url` - Backend base URL without a trailing slash
    ///   (e.g., "http://localhost:8001")
    pub fn new(base_url: impl Into<String>, config: QueryConfig) -> ApiResult<Self> {
        let client = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            config,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?params, "GET");

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Fetch the post list, parameterized by the active filters.
    pub async fn list_posts(&self, filter: &FilterState) -> ApiResult<Vec<Post>> {
        self.get_json("/api/posts", &post_query(&self.config, filter))
            .await
    }

    /// Fetch the aggregate stats.
    pub async fn fetch_stats(&self) -> ApiResult<Stats> {
        self.get_json("/api/posts/stats", &[]).await
    }

    /// Fetch the trending topics, parameterized by the source filter.
    pub async fn list_trends(&self, filter: &FilterState) -> ApiResult<Vec<TrendTopic>> {
        self.get_json("/api/trends", &trend_query(&self.config, filter))
            .await
    }

    /// Fetch per-source scraping health.
    pub async fn source_stats(&self) -> ApiResult<Vec<SourceStat>> {
        self.get_json("/api/sources/stats", &[]).await
    }

    /// Fetch the recent run history.
    pub async fn recent_runs(&self) -> ApiResult<Vec<Run>> {
        self.get_json(
            "/api/sources/runs",
            &[("limit", self.config.runs_limit.to_string())],
        )
        .await
    }

    /// Fetch the hourly activity rows for the configured window.
    pub async fn hourly_activity(&self) -> ApiResult<Vec<ActivityRow>> {
        self.get_json(
            "/api/posts/activity",
            &[("hours", self.config.activity_window_hours.to_string())],
        )
        .await
    }

    /// Ask the backend to run one source's collection immediately.
    ///
    /// The response body is not used for control flow; only the status
    /// matters to the caller, and even a failure is merely logged.
    pub async fn trigger_scrape(&self, source: &str) -> ApiResult<()> {
        let url = format!("{}/api/scraper/run/{}", self.base_url, source);
        debug!(%url, "POST");

        let response = self.client.post(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
