//! Process configuration, read once from the environment at startup.

use std::net::{AddrParseError, SocketAddr};

use crate::tfl::TflConfig;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    /// `BIND_ADDR` is not a socket address
    #[error("invalid BIND_ADDR {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        source: AddrParseError,
    },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream client settings, including credentials
    pub tfl: TflConfig,
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// `APP_ID` and `APP_KEY` are required. `TFL_BASE_URL` and `BIND_ADDR`
    /// are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        let mut tfl = TflConfig::new(required("APP_ID")?, required("APP_KEY")?);
        if let Some(base_url) = lookup("TFL_BASE_URL").filter(|v| !v.is_empty()) {
            tfl = tfl.with_base_url(base_url);
        }

        let bind_addr = lookup("BIND_ADDR")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_addr.clone(),
                source,
            })?;

        Ok(Self { tfl, bind_addr })
    }
}
