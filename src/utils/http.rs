// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

use crate::error::{AppError, Result};
use crate::models::UpstreamConfig;

/// Create a configured asynchronous HTTP client for the upstream site.
pub fn create_async_client(config: &UpstreamConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, header_value("upstream.accept", &config.accept)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value("upstream.accept_language", &config.accept_language)?,
    );

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| AppError::config(format!("{field}: {e}")))
}
