use anyhow::Result;

// ============================================================================
// Configuration Constants
// ============================================================================

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ABF_TIMEOUT_MS: u64 = 2000;
const DEFAULT_CLIENT_DELAY_MS: u64 = 1000;

// ============================================================================
// Configuration Structures
// ============================================================================

/// Auth server configuration, bound once at startup and shared read-only.
#[derive(Clone, Debug)]
pub struct Config {
    /// Port the auth server listens on
    pub port: u16,
    /// Base URL of the remote anti-brute-force decision service.
    /// When unset the server falls back to a static allow-all stub.
    pub abf_url: Option<String>,
    /// Per-call timeout for the decision service (milliseconds)
    pub abf_timeout_ms: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: parse_env("PORT")?.unwrap_or(DEFAULT_PORT),
            abf_url: std::env::var("ABF_URL").ok().filter(|v| !v.is_empty()),
            abf_timeout_ms: parse_env("ABF_TIMEOUT_MS")?.unwrap_or(DEFAULT_ABF_TIMEOUT_MS),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Polling client configuration, bound once at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the auth server, e.g. "http://127.0.0.1:8080"
    pub api_server_url: String,
    /// Delay between polling iterations (milliseconds)
    pub delay_ms: u64,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_server_url = std::env::var("API_SERVER_URL")
            .map_err(|_| anyhow::anyhow!("API_SERVER_URL must be set"))?;
        if api_server_url.is_empty() {
            anyhow::bail!("API_SERVER_URL must not be empty");
        }

        Ok(Self {
            api_server_url,
            delay_ms: parse_env("DELAY_MS")?.unwrap_or(DEFAULT_CLIENT_DELAY_MS),
        })
    }
}

/// Parse an optional environment variable, failing startup on unparseable values
/// instead of silently falling back to the default.
fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("{} has invalid value: {:?}", name, raw)),
        Err(_) => Ok(None),
    }
}
