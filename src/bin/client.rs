use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use abf_mock::client::PollClient;
use abf_mock::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = ClientConfig::from_env()?;
    tracing::info!(
        api_server_url = %config.api_server_url,
        delay_ms = config.delay_ms,
        "Starting polling client"
    );

    let client = PollClient::new(&config)?;

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?e, "Failed to install Ctrl+C handler");
            return;
        }
        tracing::info!("Received Ctrl+C, stopping");
        signal_cancel.cancel();
    });

    client.run(cancel).await;
    Ok(())
}
