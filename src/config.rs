use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::api::{CoinbaseClient, LnbitsClient, NodeClient};
use crate::services::poll_service::PollerSettings;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Unknown WALLET_BACKEND '{0}' (expected 'lnbits' or 'node')")]
    UnknownBackend(String),
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Which wallet API the dashboard talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// LNbits directly, authenticated with an API key
    Lnbits,
    /// A backend proxying an LND node, with optional user sessions
    Node,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lnbits" => Ok(BackendKind::Lnbits),
            "node" | "lnd" => Ok(BackendKind::Node),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Where and how big the chart PNG is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Everything read from the environment, built once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend: BackendKind,
    pub api_key: Option<String>,
    pub backend_base_url: String,
    pub price_base_url: String,
    pub poller: PollerSettings,
    pub token_file: PathBuf,
    pub chart: ChartSettings,
}

impl Config {
    /// Build the config from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let backend = match var("WALLET_BACKEND") {
            Some(v) => v.parse()?,
            None => BackendKind::Lnbits,
        };

        let default_backend_url = match backend {
            BackendKind::Lnbits => LnbitsClient::DEFAULT_BASE_URL,
            BackendKind::Node => NodeClient::DEFAULT_BASE_URL,
        };

        let fast_ms = parse_positive(&var, "FAST_POLL_MS", 1000)?;
        let slow_ms = parse_positive(&var, "SLOW_POLL_MS", 5000)?;

        Ok(Config {
            backend,
            api_key: var("LNBITS_API_KEY").or_else(|| var("REACT_APP_API_KEY")),
            backend_base_url: var("BACKEND_URL").unwrap_or_else(|| default_backend_url.to_string()),
            price_base_url: var("PRICE_API_URL")
                .unwrap_or_else(|| CoinbaseClient::DEFAULT_BASE_URL.to_string()),
            poller: PollerSettings {
                fast_interval: Duration::from_millis(fast_ms),
                slow_interval: Duration::from_millis(slow_ms),
            },
            token_file: var("AUTH_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".pleb_wallet_token")),
            chart: ChartSettings {
                output: var("CHART_OUTPUT")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("pleb_wallet_chart.png")),
                width: parse_positive(&var, "CHART_WIDTH", 800)? as u32,
                height: parse_positive(&var, "CHART_HEIGHT", 480)? as u32,
            },
        })
    }
}

fn parse_positive<F>(var: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = var(name) else {
        return Ok(default);
    };

    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 && n <= u32::MAX as u64 => Ok(n),
        _ => Err(ConfigError::InvalidNumber { name, value }),
    }
}
