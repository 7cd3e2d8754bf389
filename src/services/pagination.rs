// src/services/pagination.rs

//! Sequential page walker.
//!
//! Pages are requested one at a time in ascending order. The walk stops at
//! the first page that yields nothing (the listing ran out) or fails; in the
//! failure case the error is logged and the records gathered so far are
//! still returned.

use std::future::Future;

use crate::error::{AppError, Result};

/// Why a walk ended.
#[derive(Debug)]
pub enum WalkStop {
    /// Every requested page produced records
    Completed,
    /// `page` produced no records
    Exhausted { page: u32 },
    /// `page` failed to fetch or parse
    Failed { page: u32, error: AppError },
}

/// Records gathered by a walk.
#[derive(Debug)]
pub struct WalkOutcome<T> {
    /// Records of every scanned page, in page order
    pub records: Vec<T>,
    /// Pages that produced records
    pub pages_scanned: u32,
    pub stop: WalkStop,
}

impl<T> WalkOutcome<T> {
    /// Whether the walk ended on an error rather than running out of pages.
    pub fn is_truncated(&self) -> bool {
        matches!(self.stop, WalkStop::Failed { .. })
    }
}

/// Drives a per-page operation across consecutive page numbers.
pub struct PaginationWalker;

impl PaginationWalker {
    /// Walk pages `1..=page_count`.
    pub async fn walk<T, F, Fut>(page_count: u32, op: F) -> WalkOutcome<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        Self::walk_from(1, page_count, op).await
    }

    /// Walk `page_count` pages starting at `first_page`.
    pub async fn walk_from<T, F, Fut>(first_page: u32, page_count: u32, mut op: F) -> WalkOutcome<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let mut records = Vec::new();
        let mut pages_scanned = 0;

        for page in first_page..first_page.saturating_add(page_count) {
            match op(page).await {
                Ok(batch) if batch.is_empty() => {
                    log::debug!("Listing exhausted at page {page}");
                    return WalkOutcome {
                        records,
                        pages_scanned,
                        stop: WalkStop::Exhausted { page },
                    };
                }
                Ok(batch) => {
                    records.extend(batch);
                    pages_scanned += 1;
                }
                Err(error) => {
                    log::warn!(
                        "Stopping walk at page {page} after {pages_scanned} page(s): {error}"
                    );
                    return WalkOutcome {
                        records,
                        pages_scanned,
                        stop: WalkStop::Failed { page, error },
                    };
                }
            }
        }

        WalkOutcome {
            records,
            pages_scanned,
            stop: WalkStop::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::future::ready;

    use super::*;
    use crate::error::{FetchError, ParseError};

    /// Three records per page for pages up to `last`, empty afterwards.
    fn source(last: u32) -> impl Fn(u32) -> Result<Vec<String>> {
        move |page| {
            if page <= last {
                Ok((1..=3).map(|i| format!("p{page}-{i}")).collect())
            } else {
                Ok(Vec::new())
            }
        }
    }

    #[tokio::test]
    async fn test_walk_stops_at_exhaustion() {
        let pages = source(3);
        let mut requested = Vec::new();

        let outcome = PaginationWalker::walk(5, |page| {
            requested.push(page);
            ready(pages(page))
        })
        .await;

        assert_eq!(outcome.pages_scanned, 3);
        assert_eq!(outcome.records.len(), 9);
        assert_eq!(outcome.records.first().map(String::as_str), Some("p1-1"));
        assert_eq!(outcome.records.last().map(String::as_str), Some("p3-3"));
        assert!(matches!(outcome.stop, WalkStop::Exhausted { page: 4 }));
        assert_eq!(requested, [1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_walk_truncates_on_error() {
        let pages = source(3);
        let mut requested = Vec::new();

        let outcome = PaginationWalker::walk(3, |page| {
            requested.push(page);
            if page == 2 {
                ready(Err(FetchError::Timeout.into()))
            } else {
                ready(pages(page))
            }
        })
        .await;

        assert_eq!(outcome.pages_scanned, 1);
        assert_eq!(outcome.records, ["p1-1", "p1-2", "p1-3"]);
        assert!(outcome.is_truncated());
        assert!(matches!(
            outcome.stop,
            WalkStop::Failed {
                page: 2,
                error: AppError::Fetch(FetchError::Timeout)
            }
        ));
        assert_eq!(requested, [1, 2]);
    }

    #[tokio::test]
    async fn test_walk_stops_on_parse_error_at_first_page() {
        let outcome: WalkOutcome<String> = PaginationWalker::walk(3, |_| {
            ready(Err(ParseError::missing("listing table").into()))
        })
        .await;

        assert_eq!(outcome.pages_scanned, 0);
        assert!(outcome.records.is_empty());
        assert!(outcome.is_truncated());
    }

    #[tokio::test]
    async fn test_walk_completes_all_pages() {
        let pages = source(10);
        let outcome = PaginationWalker::walk(2, |page| ready(pages(page))).await;

        assert_eq!(outcome.pages_scanned, 2);
        assert_eq!(outcome.records.len(), 6);
        assert!(matches!(outcome.stop, WalkStop::Completed));
    }

    #[tokio::test]
    async fn test_walk_from_offsets_pages() {
        let pages = source(10);
        let mut requested = Vec::new();

        let outcome = PaginationWalker::walk_from(4, 2, |page| {
            requested.push(page);
            ready(pages(page))
        })
        .await;

        assert_eq!(requested, [4, 5]);
        assert_eq!(outcome.records[0], "p4-1");
    }

    #[tokio::test]
    async fn test_walk_zero_pages_fetches_nothing() {
        let mut calls = 0;
        let outcome: WalkOutcome<String> = PaginationWalker::walk(0, |_| {
            calls += 1;
            ready(Ok(Vec::new()))
        })
        .await;

        assert_eq!(calls, 0);
        assert_eq!(outcome.pages_scanned, 0);
        assert!(matches!(outcome.stop, WalkStop::Completed));
    }
}
