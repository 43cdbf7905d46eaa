use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BULLETS_TIMEOUT_SECS: u64 = 30;

/// Service configuration loaded from environment variables (and `.env`).
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Enables the `/api/generate-bullets` proxy. Without it the endpoint
    /// answers with an error and the assistant yields no suggestions.
    pub anthropic_api_key: Option<String>,
    /// Where the bullet assistant sends requests. Defaults to this service's
    /// own endpoint.
    pub bullets_endpoint_url: String,
    pub bullets_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            anthropic_api_key: None,
            bullets_endpoint_url: local_bullets_endpoint(DEFAULT_PORT),
            bullets_timeout_secs: DEFAULT_BULLETS_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let port = match optional_env("PORT") {
            Some(v) => v
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };
        let bullets_timeout_secs = match optional_env("BULLETS_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("BULLETS_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_BULLETS_TIMEOUT_SECS,
        };

        Ok(Config {
            port,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            bullets_endpoint_url: optional_env("BULLETS_ENDPOINT_URL")
                .unwrap_or_else(|| local_bullets_endpoint(port)),
            bullets_timeout_secs,
        })
    }
}

/// Unset and blank variables read as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn local_bullets_endpoint(port: u16) -> String {
    format!("http://127.0.0.1:{port}/api/generate-bullets")
}
