use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Url;

/// Backend used when `API_BASE_URL` is not set (local scoring service).
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
/// Uniform per-request timeout for submit, list and get.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 20_000;

/// Client configuration loaded from environment variables.
/// Every variable has a default; only malformed values are rejected.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config for an explicit backend, keeping the default timeout.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Config {
            api_base_url: parse_base_url(base_url)?,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            rust_log: "info".to_string(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let timeout_ms = match lookup("REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_MS must be a whole number of milliseconds")?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };
        if timeout_ms == 0 {
            bail!("REQUEST_TIMEOUT_MS must be greater than zero");
        }

        Ok(Config {
            api_base_url: parse_base_url(&base_url)?,
            request_timeout: Duration::from_millis(timeout_ms),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("API_BASE_URL '{raw}' is not a valid absolute URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("API_BASE_URL must use http or https, got '{}'", url.scheme());
    }
    if url.cannot_be_a_base() {
        bail!("API_BASE_URL '{raw}' cannot be used as a base URL");
    }
    Ok(url)
}
