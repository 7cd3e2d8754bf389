//! Utility functions and helpers.

pub mod http;
pub mod text;

use regex::Regex;
use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Pattern for a numeric query parameter in a link (`?seq_id=123`, `&seq_id=123`).
///
/// Works on relative links and on `javascript:` hrefs that embed a query
/// string, which `Url` would not parse.
pub fn numeric_param_pattern(param: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"[?&;]{}=(\d+)", regex::escape(param)))
}

/// First capture group of `pattern` in `text`.
pub fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Lower-cased extension of a link's path, ignoring query and fragment.
pub fn link_extension(href: &str) -> Option<String> {
    let path = href.split(['?', '#']).next()?;
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}
