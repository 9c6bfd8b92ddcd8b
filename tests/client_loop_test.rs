// ============================================================================
// Polling Client Tests
// ============================================================================
//
// Drives the polling client against a scripted server:
// - outcome classification for success / failure-status / malformed-body
// - prompt loop exit when cancellation arrives during the delay wait
//
// ============================================================================

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use abf_mock::client::{PollClient, PollOutcome};
use abf_mock::ClientConfig;

type Script = Arc<Mutex<VecDeque<(StatusCode, String)>>>;

/// Spawn a server that replays a scripted response sequence for /echo/{value},
/// then answers 200 `{"value":1}` forever.
async fn spawn_scripted_server(script: Vec<(StatusCode, &str)>) -> String {
    let script: Script = Arc::new(Mutex::new(
        script
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect(),
    ));

    let router = Router::new()
        .route(
            "/echo/:value",
            get(move || {
                let script = script.clone();
                async move {
                    let next = script.lock().await.pop_front();
                    match next {
                        Some((status, body)) => (status, body).into_response(),
                        None => (StatusCode::OK, r#"{"value":1}"#.to_string()).into_response(),
                    }
                }
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("127.0.0.1:{}", listener.local_addr().unwrap().port());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    address
}

fn poll_client(address: &str, delay_ms: u64) -> PollClient {
    PollClient::new(&ClientConfig {
        api_server_url: format!("http://{}", address),
        delay_ms,
    })
    .unwrap()
}

#[tokio::test]
async fn outcomes_are_classified_and_none_stops_the_loop() {
    let address = spawn_scripted_server(vec![
        (StatusCode::OK, r#"{"value":5}"#),
        (StatusCode::SERVICE_UNAVAILABLE, ""),
        (StatusCode::OK, "definitely not json"),
    ])
    .await;
    let client = poll_client(&address, 10);

    match client.poll_once(5).await {
        PollOutcome::Echoed { sent, received } => {
            assert_eq!(sent, 5);
            assert_eq!(received, 5);
        }
        other => panic!("expected Echoed, got {:?}", other),
    }

    match client.poll_once(6).await {
        PollOutcome::FailureStatus(status) => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE)
        }
        other => panic!("expected FailureStatus, got {:?}", other),
    }

    match client.poll_once(7).await {
        PollOutcome::DecodeFailure => {}
        other => panic!("expected DecodeFailure, got {:?}", other),
    }

    // The script is exhausted and the server keeps answering: the loop would
    // carry on after all three outcomes.
    match client.poll_once(8).await {
        PollOutcome::Echoed { received, .. } => assert_eq!(received, 1),
        other => panic!("expected Echoed, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_request_error_not_a_crash() {
    // Nothing listens on this port
    let client = poll_client("127.0.0.1:1", 10);

    match client.poll_once(1).await {
        PollOutcome::RequestError(_) => {}
        other => panic!("expected RequestError, got {:?}", other),
    }
}

#[tokio::test]
async fn cancellation_during_the_delay_exits_promptly() {
    let address = spawn_scripted_server(vec![]).await;
    // Delay far longer than the acceptable cancellation latency
    let client = poll_client(&address, 5000);

    let cancel = CancellationToken::new();
    let loop_cancel = cancel.clone();
    let handle = tokio::spawn(async move { client.run(loop_cancel).await });

    // Let the first iteration finish and the loop settle into its delay wait
    tokio::time::sleep(Duration::from_millis(200)).await;

    let cancelled_at = Instant::now();
    cancel.cancel();

    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("loop must exit well before the configured delay elapses")
        .unwrap();
    assert!(cancelled_at.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn pre_cancelled_token_prevents_any_iteration() {
    let address = spawn_scripted_server(vec![(StatusCode::OK, r#"{"value":9}"#)]).await;
    let client = poll_client(&address, 10);

    let cancel = CancellationToken::new();
    cancel.cancel();
    client.run(cancel).await;

    // The scripted response was never consumed
    match client.poll_once(9).await {
        PollOutcome::Echoed { received, .. } => assert_eq!(received, 9),
        other => panic!("expected Echoed, got {:?}", other),
    }
}
