//! Orchestrated fetch: fan-out of the six view queries.

use crate::client::ApiClient;
use chrono::Utc;
use pulse_state::StateStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Issues the six independent view queries in parallel and writes each
/// result into the store as it settles.
///
/// A failed query is logged and leaves the corresponding store field at
/// its previous value, so the display stays stale-but-valid rather than
/// blank. Nothing prevents two `refresh_all` calls from being in flight
/// at once; each field write is independent and the later write wins.
pub struct FetchOrchestrator {
    api: Arc<ApiClient>,
    store: Arc<StateStore>,
}

impl FetchOrchestrator {
    pub fn new(api: Arc<ApiClient>, store: Arc<StateStore>) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    /// Run one orchestrated fetch.
    ///
    /// Waits for all six queries to settle, stamps the last-updated time,
    /// and flips the loading flag true then false exactly once. Never
    /// returns an error; per-query failures are absorbed at the query
    /// boundary.
    pub async fn refresh_all(&self) {
        self.store.set_loading(true);

        // Snapshot the filters once so all six queries of this call agree.
        let filter = self.store.filters();
        debug!(source = %filter.source, search = %filter.search, "Starting orchestrated fetch");

        tokio::join!(
            async {
                match self.api.list_posts(&filter).await {
                    Ok(posts) => self.store.set_posts(posts),
                    Err(e) => warn!(error = %e, "Post query failed, keeping previous posts"),
                }
            },
            async {
                match self.api.fetch_stats().await {
                    Ok(stats) => self.store.set_stats(stats),
                    Err(e) => warn!(error = %e, "Stats query failed, keeping previous stats"),
                }
            },
            async {
                match self.api.list_trends(&filter).await {
                    Ok(trends) => self.store.set_trends(trends),
                    Err(e) => warn!(error = %e, "Trend query failed, keeping previous trends"),
                }
            },
            async {
                match self.api.source_stats().await {
                    Ok(stats) => self.store.set_source_stats(stats),
                    Err(e) => {
                        warn!(error = %e, "Source stats query failed, keeping previous stats");
                    }
                }
            },
            async {
                match self.api.recent_runs().await {
                    Ok(runs) => self.store.set_runs(runs),
                    Err(e) => warn!(error = %e, "Run history query failed, keeping previous runs"),
                }
            },
            async {
                match self.api.hourly_activity().await {
                    Ok(rows) => self.store.set_activity(rows),
                    Err(e) => {
                        warn!(error = %e, "Activity query failed, keeping previous activity");
                    }
                }
            },
        );

        self.store.set_last_updated(Utc::now());
        self.store.set_loading(false);
        debug!("Orchestrated fetch settled");
    }

    /// Manually trigger one source's scrape, then refresh.
    ///
    /// The trigger result is not used for control flow: success or failure,
    /// the refresh runs so the view picks up whatever the backend has.
    pub async fn trigger_scrape(&self, source: &str) {
        if let Err(e) = self.api.trigger_scrape(source).await {
            warn!(source, error = %e, "Manual scrape trigger failed");
        }
        self.refresh_all().await;
    }
}
