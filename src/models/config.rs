//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::SelectorConfig;
use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Upstream site and HTTP client settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Page anchors and listing column layout
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// Text extraction settings
    #[serde(default)]
    pub parsing: ParsingConfig,

    /// HTTP API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Override settings from `NOTICE_*` environment variables.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override settings from any key/value source.
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("NOTICE_BASE_URL") {
            self.upstream.base_url = url;
        }
        if let Some(bind) = lookup("NOTICE_BIND") {
            self.api.bind = bind;
        }
        if let Some(level) = lookup("NOTICE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(timeout) = lookup("NOTICE_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.upstream.timeout_secs = secs,
                Err(_) => log::warn!("Ignoring NOTICE_TIMEOUT_SECS={timeout:?}"),
            }
        }
        if let Some(pages) = lookup("NOTICE_MAX_PAGES") {
            match pages.parse() {
                Ok(n) => self.api.max_pages = n,
                Err(_) => log::warn!("Ignoring NOTICE_MAX_PAGES={pages:?}"),
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.upstream.base_url)
            .map_err(|e| AppError::validation(format!("upstream.base_url: {e}")))?;
        if self.upstream.user_agent.trim().is_empty() {
            return Err(AppError::validation("upstream.user_agent is empty"));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(AppError::validation("upstream.timeout_secs must be > 0"));
        }
        if self.selectors.listing_table.is_empty() {
            return Err(AppError::validation("selectors.listing_table is empty"));
        }
        if self.selectors.detail_container.is_empty() {
            return Err(AppError::validation("selectors.detail_container is empty"));
        }
        if self.api.max_pages == 0 {
            return Err(AppError::validation("api.max_pages must be > 0"));
        }
        if self.api.default_pages == 0 || self.api.default_pages > self.api.max_pages {
            return Err(AppError::validation(
                "api.default_pages must be within 1..=api.max_pages",
            ));
        }
        if self.api.max_limit == 0 {
            return Err(AppError::validation("api.max_limit must be > 0"));
        }
        if self.api.default_limit == 0 || self.api.default_limit > self.api.max_limit {
            return Err(AppError::validation(
                "api.default_limit must be within 1..=api.max_limit",
            ));
        }
        Ok(())
    }
}

/// Upstream site and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Scheme and host of the court site
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Path of the notice listing
    #[serde(default = "defaults::list_path")]
    pub list_path: String,

    /// Path of a single notice
    #[serde(default = "defaults::detail_path")]
    pub detail_path: String,

    /// Query parameter carrying the listing page number
    #[serde(default = "defaults::page_param")]
    pub page_param: String,

    /// Download URL for script-triggered attachments.
    ///
    /// `{base}`, `{stored}` and `{name}` are substituted; the last two are
    /// percent-encoded.
    #[serde(default = "defaults::download_url_template")]
    pub download_url_template: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    #[serde(default = "defaults::accept")]
    pub accept: String,

    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Charset assumed when the response does not declare one
    #[serde(default = "defaults::default_charset")]
    pub default_charset: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            list_path: defaults::list_path(),
            detail_path: defaults::detail_path(),
            page_param: defaults::page_param(),
            download_url_template: defaults::download_url_template(),
            user_agent: defaults::user_agent(),
            accept: defaults::accept(),
            accept_language: defaults::accept_language(),
            timeout_secs: defaults::timeout(),
            default_charset: defaults::default_charset(),
        }
    }
}

impl UpstreamConfig {
    /// Absolute URL of the listing page.
    pub fn list_url(&self) -> String {
        self.join(&self.list_path)
    }

    /// Absolute URL of the detail page (without query).
    pub fn detail_url(&self) -> String {
        self.join(&self.detail_path)
    }

    fn join(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Text extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Truncate detail bodies to this many characters
    #[serde(default)]
    pub body_char_limit: Option<usize>,

    /// File extensions recognised as plain attachment links
    #[serde(default = "defaults::attachment_extensions")]
    pub attachment_extensions: Vec<String>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            body_char_limit: None,
            attachment_extensions: defaults::attachment_extensions(),
        }
    }
}

/// HTTP API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Socket address to listen on
    #[serde(default = "defaults::bind")]
    pub bind: String,

    /// Pages walked by search and stats when the caller gives none
    #[serde(default = "defaults::default_pages")]
    pub default_pages: u32,

    /// Upper bound on pages walked per request
    #[serde(default = "defaults::max_pages")]
    pub max_pages: u32,

    #[serde(default = "defaults::default_limit")]
    pub default_limit: usize,

    #[serde(default = "defaults::max_limit")]
    pub max_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: defaults::bind(),
            default_pages: defaults::default_pages(),
            max_pages: defaults::max_pages(),
            default_limit: defaults::default_limit(),
            max_limit: defaults::max_limit(),
        }
    }
}

impl ApiConfig {
    /// Check the page and limit of a list request, filling in defaults.
    pub fn list_params(&self, page: Option<u32>, limit: Option<usize>) -> Result<(u32, usize)> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(self.default_limit);
        if page == 0 {
            return Err(AppError::validation("page must be >= 1"));
        }
        if !(1..=self.max_limit).contains(&limit) {
            return Err(AppError::validation(format!(
                "limit must be within 1..={}",
                self.max_limit
            )));
        }
        Ok((page, limit))
    }

    /// Check the page count of a search or stats request, filling in the default.
    pub fn page_count(&self, pages: Option<u32>) -> Result<u32> {
        let pages = pages.unwrap_or(self.default_pages);
        if !(1..=self.max_pages).contains(&pages) {
            return Err(AppError::validation(format!(
                "pages must be within 1..={}",
                self.max_pages
            )));
        }
        Ok(pages)
    }

    /// Trimmed search keyword; blank keywords are rejected.
    pub fn keyword(keyword: Option<&str>) -> Result<&str> {
        match keyword.map(str::trim) {
            Some(keyword) if !keyword.is_empty() => Ok(keyword),
            _ => Err(AppError::validation("keyword is required")),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Upstream defaults
    pub fn base_url() -> String {
        "https://www.scourt.go.kr".into()
    }
    pub fn list_path() -> String {
        "/portal/notice/realestate/RealNoticeList.work".into()
    }
    pub fn detail_path() -> String {
        "/portal/notice/realestate/RealNoticeView.work".into()
    }
    pub fn page_param() -> String {
        "currentPage".into()
    }
    pub fn download_url_template() -> String {
        "{base}/portal/notice/realestate/download.work?file={stored}&name={name}".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into()
    }
    pub fn accept() -> String {
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".into()
    }
    pub fn accept_language() -> String {
        "ko-KR,ko;q=0.9,en;q=0.8".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn default_charset() -> String {
        "euc-kr".into()
    }

    // Parsing defaults
    pub fn attachment_extensions() -> Vec<String> {
        ["pdf", "hwp", "hwpx", "doc", "docx", "xls", "xlsx", "zip"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    // API defaults
    pub fn bind() -> String {
        "127.0.0.1:8000".into()
    }
    pub fn default_pages() -> u32 {
        3
    }
    pub fn max_pages() -> u32 {
        10
    }
    pub fn default_limit() -> usize {
        10
    }
    pub fn max_limit() -> usize {
        50
    }

    pub fn log_level() -> String {
        "info".into()
    }
}
