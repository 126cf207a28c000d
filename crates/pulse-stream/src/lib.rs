//! Server-push event channel.
//!
//! Consumes the backend's long-lived SSE endpoint and turns recognized
//! push events into refresh signals:
//! - Connection lifecycle with automatic fixed-delay reconnection
//! - Incremental SSE frame parsing
//! - Explicit parse results for push payloads (malformed input is logged
//!   once and dropped, never surfaced)

pub mod channel;
pub mod error;
pub mod sse;

pub use channel::{ChannelConfig, ChannelState, LiveUpdateChannel, StreamEvent};
pub use error::{StreamError, StreamResult};
pub use sse::{parse_push_event, PushEvent, SseParser, SCRAPE_COMPLETE};
