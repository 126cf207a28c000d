//! Push channel lifecycle.
//!
//! Owns the single persistent SSE connection. Recognized events become
//! [`StreamEvent`]s on an mpsc channel; on any connection loss the channel
//! reconnects after a fixed delay by building a brand-new request — the
//! old stream is discarded, never retried.

use crate::error::{StreamError, StreamResult};
use crate::sse::{parse_push_event, SseParser};
use futures_util::StreamExt;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Channel configuration.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Absolute URL of the SSE endpoint.
    pub url: String,
    /// Fixed delay before each reconnection attempt.
    pub reconnect_delay: Duration,
}

impl ChannelConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_delay: Duration::from_secs(5),
        }
    }
}

/// Connection state of the push channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Connecting,
    Open,
    Closed,
}

/// Signals emitted toward the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEvent {
    /// The stream is established; the connectivity flag should be set.
    Connected,
    /// The stream dropped; the connectivity flag should be cleared.
    Disconnected,
    /// A scrape-complete push arrived; an orchestrated refresh is due.
    ScrapeComplete,
}

/// The live update channel.
pub struct LiveUpdateChannel {
    config: ChannelConfig,
    client: reqwest::Client,
    state: Arc<RwLock<ChannelState>>,
    event_tx: mpsc::Sender<StreamEvent>,
    reconnect_count: Arc<RwLock<u32>>,
    shutdown_token: CancellationToken,
}

impl LiveUpdateChannel {
    /// Create a new channel.
    ///
    /// The client carries no overall request timeout: the stream is meant
    /// to stay open indefinitely.
    pub fn new(config: ChannelConfig, event_tx: mpsc::Sender<StreamEvent>) -> StreamResult<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            config,
            client,
            state: Arc::new(RwLock::new(ChannelState::Closed)),
            event_tx,
            reconnect_count: Arc::new(RwLock::new(0)),
            shutdown_token: CancellationToken::new(),
        })
    }

    /// Current connection state.
    pub fn state(&self) -> ChannelState {
        *self.state.read()
    }

    /// Number of reconnection attempts since the channel was opened.
    pub fn reconnect_count(&self) -> u32 {
        *self.reconnect_count.read()
    }

    /// Signal graceful shutdown; `run` returns promptly.
    pub fn shutdown(&self) {
        self.shutdown_token.cancel();
    }

    /// Connect and keep the channel alive until shutdown.
    ///
    /// Exactly one reconnection attempt is pending at any time, gated on
    /// the fixed delay. A missed event while disconnected is papered over
    /// by the next poll-driven refresh.
    pub async fn run(&self) {
        loop {
            if self.shutdown_token.is_cancelled() {
                *self.state.write() = ChannelState::Closed;
                return;
            }

            *self.state.write() = ChannelState::Connecting;

            match self.stream_once().await {
                Ok(()) => info!("Event stream ended"),
                Err(e) => warn!(error = %e, "Event stream error"),
            }

            *self.state.write() = ChannelState::Closed;
            let _ = self.event_tx.send(StreamEvent::Disconnected).await;

            if self.shutdown_token.is_cancelled() {
                return;
            }

            *self.reconnect_count.write() += 1;
            debug!(
                attempt = self.reconnect_count(),
                delay_ms = self.config.reconnect_delay.as_millis(),
                "Scheduling reconnect"
            );

            tokio::select! {
                () = tokio::time::sleep(self.config.reconnect_delay) => {}
                () = self.shutdown_token.cancelled() => return,
            }
        }
    }

    /// Open one fresh stream and consume it until it drops.
    async fn stream_once(&self) -> StreamResult<()> {
        debug!(url = %self.config.url, "Opening event stream");

        let response = self
            .client
            .get(&self.config.url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::Status {
                status: status.as_u16(),
            });
        }

        *self.state.write() = ChannelState::Open;
        let _ = self.event_tx.send(StreamEvent::Connected).await;
        info!("Event stream connected");

        let mut body = response.bytes_stream();
        let mut parser = SseParser::new();

        loop {
            tokio::select! {
                () = self.shutdown_token.cancelled() => {
                    info!("Shutdown requested, dropping event stream");
                    return Ok(());
                }
                chunk = body.next() => match chunk {
                    Some(Ok(bytes)) => {
                        for payload in parser.push(&bytes) {
                            self.handle_payload(&payload).await;
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                }
            }
        }
    }

    async fn handle_payload(&self, payload: &str) {
        // Empty payloads are server keep-alives.
        if payload.is_empty() {
            return;
        }

        match parse_push_event(payload) {
            Ok(event) if event.is_scrape_complete() => {
                debug!(source = ?event.source, "Scrape-complete push received");
                if self.event_tx.send(StreamEvent::ScrapeComplete).await.is_err() {
                    warn!("Event receiver dropped");
                }
            }
            Ok(event) => debug!(tag = %event.event, "Ignoring unrecognized push event"),
            Err(e) => debug!(error = %e, "Ignoring malformed push payload"),
        }
    }
}
