// src/error.rs

//! Unified error handling for the notice service.
//!
//! Transport and markup failures get their own small enums so the walker and
//! the route layer can tell them apart; everything else funnels into
//! [`AppError`].

use std::fmt;

use thiserror::Error;

/// Result type alias for notice operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Transport-layer failure of a single upstream request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request did not complete within the configured timeout
    #[error("upstream request timed out")]
    Timeout,

    /// DNS, connect, TLS or body-read failure
    #[error("upstream connection failed: {0}")]
    ConnectionFailed(String),

    /// The upstream answered with a non-success status
    #[error("upstream returned HTTP {0}")]
    HttpStatus(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if let Some(status) = error.status() {
            Self::HttpStatus(status.as_u16())
        } else {
            Self::ConnectionFailed(error.to_string())
        }
    }
}

/// Upstream markup no longer matches the expected anchors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required structural anchor was not found in the document
    #[error("page structure mismatch: missing {anchor}")]
    StructureMismatch { anchor: String },
}

impl ParseError {
    /// Create a structure mismatch for the named anchor.
    pub fn missing(anchor: impl Into<String>) -> Self {
        Self::StructureMismatch {
            anchor: anchor.into(),
        }
    }
}

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Upstream fetch failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Upstream page could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller-supplied parameter was rejected
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
