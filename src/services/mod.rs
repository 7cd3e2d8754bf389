//! Service layer for the notice API.
//!
//! This module contains the extraction engine:
//! - Upstream fetching (`PageFetcher`, `HttpFetcher`)
//! - Listing/detail parsing (`NoticeParser`)
//! - Multi-page traversal (`PaginationWalker`)
//! - Keyword search (`SearchFilter`) and court statistics (`StatsAggregator`)
//! - The facade used by the route layer (`NoticeService`)

mod fetcher;
mod notices;
mod pagination;
mod parser;
mod search;
mod stats;

#[cfg(test)]
pub(crate) mod fixtures;

pub use fetcher::{HttpFetcher, PageFetcher};
pub use notices::NoticeService;
pub use pagination::{PaginationWalker, WalkOutcome, WalkStop};
pub use parser::NoticeParser;
pub use search::SearchFilter;
pub use stats::StatsAggregator;
