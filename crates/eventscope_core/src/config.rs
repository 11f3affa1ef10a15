//! Client configuration for the record and person-registry services.
//!
//! # Responsibility
//! - Hold the backend base URL, request timeout and page-size defaults.
//! - Load overrides from `EVENTSCOPE_*` environment variables.
//!
//! # Invariants
//! - A validated config has an `http(s)` base URL without trailing slash.
//! - Timeout and page sizes are never zero.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const ENV_API_BASE: &str = "EVENTSCOPE_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "EVENTSCOPE_TIMEOUT_SECS";
pub const ENV_PAGE_SIZE: &str = "EVENTSCOPE_PAGE_SIZE";
pub const ENV_LOOKUP_PAGE_SIZE: &str = "EVENTSCOPE_LOOKUP_PAGE_SIZE";

const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LIST_PAGE_SIZE: u32 = 20;
const DEFAULT_LOOKUP_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Configuration validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBaseUrl(String),
    InvalidNumber { key: &'static str, value: String },
    OutOfRange { key: &'static str, value: u64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => {
                write!(f, "base url must start with http:// or https://, got `{value}`")
            }
            Self::InvalidNumber { key, value } => {
                write!(f, "`{key}` must be a positive integer, got `{value}`")
            }
            Self::OutOfRange { key, value } => write!(f, "`{key}` is out of range: {value}"),
        }
    }
}

impl Error for ConfigError {}

/// Backend access and paging defaults shared by every view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root of the REST API, e.g. `http://localhost:8000/api`.
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Default page size for list views.
    pub list_page_size: u32,
    /// Fixed page size for the person lookup panel.
    pub lookup_page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            list_page_size: DEFAULT_LIST_PAGE_SIZE,
            lookup_page_size: DEFAULT_LOOKUP_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with any `EVENTSCOPE_*` variables, then validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base) = lookup(ENV_API_BASE) {
            config.base_url = base;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = parse_positive(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            config.list_page_size = parse_page_size(ENV_PAGE_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOOKUP_PAGE_SIZE) {
            config.lookup_page_size = parse_page_size(ENV_LOOKUP_PAGE_SIZE, &raw)?;
        }
        config.validate()
    }

    /// Checks invariants and returns the normalized config.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let base = self.base_url.trim().trim_end_matches('/').to_string();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url));
        }
        self.base_url = base;

        if self.timeout_secs == 0 {
            return Err(ConfigError::OutOfRange {
                key: ENV_TIMEOUT_SECS,
                value: 0,
            });
        }
        for (key, size) in [
            (ENV_PAGE_SIZE, self.list_page_size),
            (ENV_LOOKUP_PAGE_SIZE, self.lookup_page_size),
        ] {
            if size == 0 || size > MAX_PAGE_SIZE {
                return Err(ConfigError::OutOfRange {
                    key,
                    value: u64::from(size),
                });
            }
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: raw.to_string(),
        }),
    }
}

fn parse_page_size(key: &'static str, raw: &str) -> Result<u32, ConfigError> {
    let value = parse_positive(key, raw)?;
    u32::try_from(value).map_err(|_| ConfigError::OutOfRange { key, value })
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, ConfigError, ENV_API_BASE, ENV_PAGE_SIZE, ENV_TIMEOUT_SECS};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_dashboard_values() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.list_page_size, 20);
        assert_eq!(config.lookup_page_size, 10);
    }

    #[test]
    fn env_overrides_apply_and_trailing_slash_is_dropped() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_BASE, "https://records.example/api/"),
            (ENV_TIMEOUT_SECS, "3"),
            (ENV_PAGE_SIZE, "50"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://records.example/api");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.list_page_size, 50);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_API_BASE, "ftp://x")])),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_PAGE_SIZE, "500")])),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn deserializes_with_partial_fields() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"http://svc/api","list_page_size":50}"#).unwrap();
        assert_eq!(config.lookup_page_size, 10);
        assert_eq!(config.list_page_size, 50);
    }
}
