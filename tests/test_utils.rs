use async_trait::async_trait;
use std::sync::Arc;
use tokio::net::TcpListener;

use abf_mock::abf::{Decision, DecisionClient, RequestAttributes};
use abf_mock::{create_router, AppContext, AppError, Config, ResourceStore};

pub struct TestApp {
    pub address: String,
}

/// Spawn the auth server on an ephemeral port with an injected decision
/// client.
pub async fn spawn_app(decision_client: Arc<dyn DecisionClient>) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let config = Arc::new(Config {
        port,
        abf_url: None,
        abf_timeout_ms: 2000,
        rust_log: "info".to_string(),
    });
    let app_context = Arc::new(AppContext::new(
        config,
        Arc::new(ResourceStore::new()),
        decision_client,
    ));

    tokio::spawn(async move {
        axum::serve(listener, create_router(app_context))
            .await
            .unwrap();
    });

    TestApp {
        address: format!("127.0.0.1:{}", port),
    }
}

/// Decision client whose remote call always fails, for fault injection.
pub struct FailingDecisionClient;

#[async_trait]
impl DecisionClient for FailingDecisionClient {
    async fn evaluate(&self, _attrs: &RequestAttributes) -> Result<Decision, AppError> {
        Err(AppError::admission("decision service unreachable"))
    }
}

/// Decision client that panics instead of answering, for fault injection
/// inside the gate itself.
pub struct PanickingDecisionClient;

#[async_trait]
impl DecisionClient for PanickingDecisionClient {
    async fn evaluate(&self, _attrs: &RequestAttributes) -> Result<Decision, AppError> {
        panic!("decision client exploded");
    }
}
