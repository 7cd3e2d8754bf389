// src/models/mod.rs

//! Domain models for the notice service.
//!
//! Every record here is built per request from freshly fetched upstream
//! pages and dropped once the response is written.

mod config;
mod notice;
mod results;
mod selectors;

// Re-export all public types
pub use config::{ApiConfig, Config, LoggingConfig, ParsingConfig, UpstreamConfig};
pub use notice::{Attachment, NoticeDetail, NoticeSummary};
pub use results::{CourtStats, ListResult, SearchResult, StatsReport};
pub use selectors::{ListingColumns, SelectorConfig};
