//! Dashboard sync client.
//!
//! Wires the pieces into one long-running application:
//! - REST fetch orchestration against the dashboard backend
//! - Server-push event channel with fixed-delay reconnection
//! - Periodic poll timer as the fallback refresh path
//! - Activity chart rebuild on state changes

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use logging::init_logging;
