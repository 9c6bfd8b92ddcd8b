// ============================================================================
// Polling Client
// ============================================================================
//
// Unbounded loop: pick a random integer, GET /echo/{value}, classify the
// outcome, log it, sleep the configured delay. One request in flight at a
// time. Cancellation is cooperative and observed both at the loop top and
// mid-delay, so stopping never waits out the full delay period.
//
// ============================================================================

use reqwest::StatusCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::AppError;
use crate::resource::Resource;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Outcome of one polling iteration. None of these stop the loop.
#[derive(Debug)]
pub enum PollOutcome {
    /// Success status with a decodable body
    Echoed { sent: i64, received: i64 },
    /// Success status but the body did not decode into a resource
    DecodeFailure,
    /// Non-success status
    FailureStatus(StatusCode),
    /// The request itself failed (connection error, timeout)
    RequestError(String),
}

#[derive(Clone)]
pub struct PollClient {
    http: reqwest::Client,
    base_url: String,
    delay: Duration,
}

impl PollClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_server_url.trim_end_matches('/').to_string(),
            delay: Duration::from_millis(config.delay_ms),
        })
    }

    /// Issue one echo request and classify the result.
    pub async fn poll_once(&self, value: i64) -> PollOutcome {
        let url = format!("{}/echo/{}", self.base_url, value);

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<Resource>().await {
                    Ok(resource) => PollOutcome::Echoed {
                        sent: value,
                        received: resource.value,
                    },
                    Err(_) => PollOutcome::DecodeFailure,
                }
            }
            Ok(response) => PollOutcome::FailureStatus(response.status()),
            Err(e) => PollOutcome::RequestError(e.to_string()),
        }
    }

    /// Run the polling loop until the token is cancelled.
    ///
    /// The token is honored while a request is in flight and during the
    /// inter-iteration delay, so cancellation latency is bounded by the
    /// in-flight request rather than the configured delay.
    pub async fn run(&self, cancel: CancellationToken) {
        while !cancel.is_cancelled() {
            let value = rand::random::<i32>() as i64;

            let outcome = tokio::select! {
                _ = cancel.cancelled() => break,
                outcome = self.poll_once(value) => outcome,
            };

            log_outcome(&outcome);

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.delay) => {}
            }
        }

        tracing::info!("Polling loop stopped");
    }
}

fn log_outcome(outcome: &PollOutcome) {
    match outcome {
        PollOutcome::Echoed { sent, received } => {
            tracing::info!(sent, received, "Echo round trip completed");
        }
        PollOutcome::DecodeFailure => {
            tracing::warn!("Got troubles during response deserialization");
        }
        PollOutcome::FailureStatus(status) => {
            tracing::warn!(status = %status.as_u16(), "Request failed");
        }
        PollOutcome::RequestError(error) => {
            tracing::warn!(error = %error, "Request could not be sent");
        }
    }
}
