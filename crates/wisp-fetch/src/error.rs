//! Fetch error types

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("{kind} error: {message}")]
    Network {
        kind: NetworkErrorKind,
        message: String,
    },

    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    Timeout,
    Dns,
    Tls,
    Connect,
    Request,
    Body,
    Unknown,
}

impl NetworkErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkErrorKind::Timeout => "timeout",
            NetworkErrorKind::Dns => "dns",
            NetworkErrorKind::Tls => "tls",
            NetworkErrorKind::Connect => "connect",
            NetworkErrorKind::Request => "request",
            NetworkErrorKind::Body => "body",
            NetworkErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
