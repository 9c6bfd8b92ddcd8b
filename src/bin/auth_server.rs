use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use abf_mock::abf::{DecisionClient, HttpDecisionClient, StaticDecisionClient};
use abf_mock::{create_router, AppContext, Config, ResourceStore};

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
    let config = Arc::new(Config::from_env()?);

    let decision_client: Arc<dyn DecisionClient> = match &config.abf_url {
        Some(url) => {
            tracing::info!(abf_url = %url, "Using remote anti-brute-force decision service");
            Arc::new(HttpDecisionClient::new(url, config.abf_timeout_ms)?)
        }
        None => {
            tracing::warn!("ABF_URL is not set, admitting all requests");
            Arc::new(StaticDecisionClient::allow())
        }
    };

    let app_context = Arc::new(AppContext::new(
        config.clone(),
        Arc::new(ResourceStore::new()),
        decision_client,
    ));

    let bind_address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!("Auth server listening on http://{}", bind_address);

    axum::serve(listener, create_router(app_context))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Auth server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = ?e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received. Shutting down...");
}
