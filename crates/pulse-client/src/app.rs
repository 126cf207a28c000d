//! Main application orchestration.
//!
//! Startup order: one orchestrated fetch, then the push channel, then the
//! poll timer. The main loop multiplexes the refresh triggers; refreshes
//! run as independent tasks, so an overlapping timer tick and push event
//! are both served and the later field write wins.

use crate::config::AppConfig;
use crate::error::AppResult;
use pulse_api::{ApiClient, FetchOrchestrator};
use pulse_chart::{build_dataset, ChartBackend, ChartRenderer, LogChartBackend};
use pulse_state::{StateChange, StateStore};
use pulse_stream::{ChannelConfig, LiveUpdateChannel, StreamEvent};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Capacity of the push-event channel toward the main loop.
const STREAM_CHANNEL_CAPACITY: usize = 32;

/// Main application.
pub struct Application {
    config: AppConfig,
    store: Arc<StateStore>,
    orchestrator: Arc<FetchOrchestrator>,
    channel: Arc<LiveUpdateChannel>,
    stream_rx: mpsc::Receiver<StreamEvent>,
    renderer: ChartRenderer,
    shutdown_token: CancellationToken,
}

impl Application {
    /// Create a new application rendering through the logging backend.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        Self::with_chart_backend(config, Box::new(LogChartBackend))
    }

    /// Create an application with a caller-supplied chart backend.
    pub fn with_chart_backend(
        config: AppConfig,
        chart_backend: Box<dyn ChartBackend>,
    ) -> AppResult<Self> {
        let store = Arc::new(StateStore::new());
        let api = Arc::new(ApiClient::new(
            config.api_base_url.clone(),
            config.query.clone(),
        )?);
        let orchestrator = Arc::new(FetchOrchestrator::new(api, store.clone()));

        let (stream_tx, stream_rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);
        let channel_config = ChannelConfig {
            url: config.events_url(),
            reconnect_delay: config.reconnect_delay(),
        };
        let channel = Arc::new(LiveUpdateChannel::new(channel_config, stream_tx)?);

        Ok(Self {
            config,
            store,
            orchestrator,
            channel,
            stream_rx,
            renderer: ChartRenderer::new(chart_backend),
            shutdown_token: CancellationToken::new(),
        })
    }

    /// Shared handle to the view-state store.
    pub fn store(&self) -> Arc<StateStore> {
        self.store.clone()
    }

    /// Token that makes `run` return when cancelled.
    pub fn shutdown_handle(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Shared handle to the fetch orchestrator.
    ///
    /// Stays usable after `run` has consumed the application, so a
    /// hosting process can fire manual triggers while the loop runs.
    pub fn orchestrator(&self) -> Arc<FetchOrchestrator> {
        self.orchestrator.clone()
    }

    /// Manually trigger one source's scrape, then refresh.
    pub async fn trigger_scrape(&self, source: &str) {
        self.orchestrator.trigger_scrape(source).await;
    }

    /// Run the application until shutdown.
    pub async fn run(mut self) -> AppResult<()> {
        info!(base_url = %self.config.api_base_url, "Starting dashboard sync");

        // Subscribe before the first fetch so its change notifications,
        // the initial activity rows in particular, are buffered for the
        // loop instead of broadcast to nobody.
        let mut changes = self.store.subscribe();

        // Initial orchestrated fetch before anything else is armed.
        self.orchestrator.refresh_all().await;

        // Open the push channel.
        let channel = self.channel.clone();
        let channel_handle = tokio::spawn(async move { channel.run().await });

        // Arm the poll timer. Its immediate first tick is consumed up
        // front since the initial fetch already ran.
        let mut poll = tokio::time::interval(self.config.poll_interval());
        poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        poll.tick().await;

        let mut stream_open = true;

        info!("Entering main event loop");
        loop {
            tokio::select! {
                _ = poll.tick() => {
                    debug!("Poll tick");
                    self.spawn_refresh();
                }

                event = self.stream_rx.recv(), if stream_open => match event {
                    Some(StreamEvent::Connected) => self.store.set_connected(true),
                    Some(StreamEvent::Disconnected) => self.store.set_connected(false),
                    Some(StreamEvent::ScrapeComplete) => {
                        info!("Scrape-complete push, refreshing");
                        self.spawn_refresh();
                    }
                    None => {
                        warn!("Push channel ended, falling back to polling only");
                        stream_open = false;
                    }
                },

                change = changes.recv() => match change {
                    Ok(StateChange::Activity) => {
                        let dataset = build_dataset(&self.store.activity());
                        self.renderer.render(&dataset);
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "State observer lagged");
                    }
                    Err(RecvError::Closed) => {}
                },

                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break;
                }

                () = self.shutdown_token.cancelled() => {
                    info!("Shutdown requested");
                    break;
                }
            }
        }

        self.channel.shutdown();
        let _ = channel_handle.await;
        self.renderer.clear();
        info!("Shut down cleanly");
        Ok(())
    }

    /// Run one orchestrated fetch as its own task.
    ///
    /// Overlap with an in-flight refresh is allowed; each store field is
    /// written independently and the later write wins.
    fn spawn_refresh(&self) {
        let orchestrator = self.orchestrator.clone();
        tokio::spawn(async move { orchestrator.refresh_all().await });
    }
}
