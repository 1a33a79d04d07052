//! Server configuration constants and environment overrides.
//!
//! Defaults apply when the matching environment variable is unset.

use std::env;
use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;

/// Interface the HTTP/WebSocket server binds to.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port the HTTP/WebSocket server listens on.
pub const DEFAULT_PORT: u16 = 8080;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const IDLE_TIMEOUT_ENV: &str = "IDLE_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var} value {value:?}: {source}")]
    InvalidNumber {
        var: &'static str,
        value: String,
        source: ParseIntError,
    },
}

/// Runtime settings for the server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Forfeit the side to move after this long without a move. `None` disables the reaper.
    pub idle_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            idle_timeout: crate::config::session::IDLE_TIMEOUT_SECS.map(Duration::from_secs),
        }
    }
}

impl ServerConfig {
    /// Reads `HOST`, `PORT` and `IDLE_TIMEOUT_SECS` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup(HOST_ENV).filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = lookup(PORT_ENV) {
            config.port = parse_number(PORT_ENV, &port)?;
        }
        if let Some(secs) = lookup(IDLE_TIMEOUT_ENV) {
            let secs: u64 = parse_number(IDLE_TIMEOUT_ENV, &secs)?;
            // 0 turns the reaper off.
            config.idle_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        Ok(config)
    }
}

fn parse_number<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    value
        .trim()
        .parse()
        .map_err(|source| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
            source,
        })
}
