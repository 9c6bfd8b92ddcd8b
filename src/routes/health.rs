/// Health check endpoint. The harness has no backing services, so reaching
/// the handler is the whole check.
pub async fn health_check() -> &'static str {
    "OK"
}
