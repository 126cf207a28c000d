//! Dashboard sync client - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Real-time dashboard state synchronization client
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PULSE_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    pulse_client::init_logging()?;

    info!("Starting pulse client v{}", env!("CARGO_PKG_VERSION"));

    let config = pulse_client::AppConfig::load(args.config.as_deref())?;
    info!(
        base_url = %config.api_base_url,
        poll_interval_secs = config.poll_interval_secs,
        "Configuration loaded"
    );

    let app = pulse_client::Application::new(config)?;
    app.run().await?;

    Ok(())
}
