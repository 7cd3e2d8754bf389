//! Per-request result shapes handed to the route layer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::NoticeSummary;

/// A slice of the listing starting at a given upstream page.
#[derive(Debug, Clone, Serialize)]
pub struct ListResult {
    pub page: u32,
    pub limit: usize,
    pub notices: Vec<NoticeSummary>,
    /// Upstream pages fetched to fill the slice
    pub pages_scanned: u32,
    pub scraped_at: DateTime<Utc>,
}

/// Keyword matches found while walking the listing.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub keyword: String,
    pub matches: Vec<NoticeSummary>,
    pub pages_scanned: u32,
    /// Number of records the keyword was tested against
    pub total_searched: usize,
    pub scraped_at: DateTime<Utc>,
}

impl SearchResult {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// Notice count for one court.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CourtStats {
    pub court: String,
    pub count: usize,
}

/// Court statistics over the first pages of the listing.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    /// Ordered by count, descending
    pub courts: Vec<CourtStats>,
    pub total_notices: usize,
    pub pages_requested: u32,
    pub pages_scanned: u32,
    pub scraped_at: DateTime<Utc>,
}
