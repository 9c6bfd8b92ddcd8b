// ============================================================================
// Anti-Brute-Force Decision Client
// ============================================================================
//
// The auth server never implements throttling itself; it asks a remote
// decision service whether each request may proceed. The service is an
// injected dependency behind the `DecisionClient` capability so the admission
// gate stays transport-agnostic.
//
// ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::AppError;

/// Outcome of one admission evaluation. Exists only for the duration of a
/// single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Request-identifying attributes forwarded to the decision service.
#[derive(Debug, Clone, Serialize)]
pub struct RequestAttributes {
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
}

#[async_trait]
pub trait DecisionClient: Send + Sync {
    /// Ask the decision service whether a request may proceed.
    ///
    /// Transport failures (timeout, connection refused) surface as errors and
    /// are left for the containment boundary; no retry happens here.
    async fn evaluate(&self, attrs: &RequestAttributes) -> Result<Decision, AppError>;
}

/// HTTP client for a remote decision service.
///
/// Wire contract: synchronous POST of the request attributes as JSON to
/// `{base_url}/v1/decision`, answered with `{"allow": bool}`.
pub struct HttpDecisionClient {
    client: reqwest::Client,
    decision_url: String,
}

#[derive(Deserialize)]
struct DecisionResponse {
    allow: bool,
}

impl HttpDecisionClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            decision_url: format!("{}/v1/decision", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl DecisionClient for HttpDecisionClient {
    async fn evaluate(&self, attrs: &RequestAttributes) -> Result<Decision, AppError> {
        let response = self
            .client
            .post(&self.decision_url)
            .json(attrs)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::admission(format!(
                "decision service returned {}",
                status
            )));
        }

        let body: DecisionResponse = response.json().await?;
        Ok(if body.allow {
            Decision::Allow
        } else {
            Decision::Deny
        })
    }
}

/// Fixed-outcome client, used when no decision service is configured and in
/// tests.
pub struct StaticDecisionClient {
    decision: Decision,
}

impl StaticDecisionClient {
    pub fn allow() -> Self {
        Self {
            decision: Decision::Allow,
        }
    }

    pub fn deny() -> Self {
        Self {
            decision: Decision::Deny,
        }
    }
}

#[async_trait]
impl DecisionClient for StaticDecisionClient {
    async fn evaluate(&self, _attrs: &RequestAttributes) -> Result<Decision, AppError> {
        Ok(self.decision)
    }
}
