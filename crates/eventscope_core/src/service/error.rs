//! Service error taxonomy.

use crate::config::ConfigError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures talking to the record service or the person registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Connection, TLS or timeout failure; no response was read.
    Transport(String),
    /// Non-success HTTP status other than a detail-endpoint 404.
    Status { status: u16, detail: String },
    /// The requested record or person does not exist.
    NotFound(String),
    /// Body was not the expected JSON shape.
    Decode(String),
    InvalidConfig(ConfigError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "network error: {message}"),
            Self::Status { status, detail } => write!(f, "service returned {status}: {detail}"),
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::Decode(message) => write!(f, "unexpected response body: {message}"),
            Self::InvalidConfig(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConfig(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for ServiceError {
    fn from(value: ConfigError) -> Self {
        Self::InvalidConfig(value)
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            return Self::Decode(value.to_string());
        }
        if let Some(status) = value.status() {
            return Self::Status {
                status: status.as_u16(),
                detail: value.to_string(),
            };
        }
        Self::Transport(value.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}
