// src/services/notices.rs

//! Notice service.
//!
//! Entry point for the route layer and the CLI: wires the fetcher, parser,
//! walker, filter and aggregator into the four read operations.

use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, ListResult, NoticeDetail, NoticeSummary, SearchResult, StatsReport};
use crate::services::{
    HttpFetcher, NoticeParser, PageFetcher, PaginationWalker, SearchFilter, StatsAggregator,
    WalkOutcome,
};
use crate::utils::http::create_async_client;

/// Read operations over the upstream notice board.
pub struct NoticeService {
    fetcher: Arc<dyn PageFetcher>,
    parser: NoticeParser,
    list_url: String,
    detail_url: String,
    page_param: String,
    detail_id_param: String,
    max_pages: u32,
}

impl NoticeService {
    /// Create a service with the given page source.
    pub fn new(config: &Config, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        Ok(Self {
            fetcher,
            parser: NoticeParser::new(config)?,
            list_url: config.upstream.list_url(),
            detail_url: config.upstream.detail_url(),
            page_param: config.upstream.page_param.clone(),
            detail_id_param: config.selectors.detail_id_param.clone(),
            max_pages: config.api.max_pages,
        })
    }

    /// Create a service that talks to the configured upstream over HTTP.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = create_async_client(&config.upstream)?;
        let fetcher = HttpFetcher::new(client, &config.upstream.default_charset);
        Self::new(config, Arc::new(fetcher))
    }

    /// Upper bound applied to every multi-page operation.
    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Fetch and parse one listing page.
    pub async fn fetch_listing_page(&self, page: u32) -> Result<Vec<NoticeSummary>> {
        let page_value = page.to_string();
        let html = self
            .fetcher
            .fetch(&self.list_url, &[(self.page_param.as_str(), page_value.as_str())])
            .await?;
        Ok(self.parser.parse_listing(&html, page)?)
    }

    /// Up to `limit` notices starting at listing page `page`.
    ///
    /// A failure on `page` itself is returned; failures on the follow-up pages
    /// only shorten the result.
    pub async fn list(&self, page: u32, limit: usize) -> Result<ListResult> {
        let mut notices = self.fetch_listing_page(page).await?;
        let mut pages_scanned = u32::from(!notices.is_empty());

        // u32::MAX is the last page that can be addressed
        let next_page = page.checked_add(1);
        if let Some(next_page) = next_page.filter(|_| !notices.is_empty() && notices.len() < limit)
        {
            let per_page = notices.len();
            let wanted = (limit - per_page).div_ceil(per_page);
            let extra_pages = u32::try_from(wanted)
                .unwrap_or(u32::MAX)
                .min(self.max_pages.saturating_sub(1));

            let outcome = PaginationWalker::walk_from(next_page, extra_pages, |p| {
                self.fetch_listing_page(p)
            })
            .await;
            notices.extend(outcome.records);
            pages_scanned += outcome.pages_scanned;
        }

        notices.truncate(limit);
        log::info!(
            "Listed {} notice(s) from page {} ({} page(s) scanned)",
            notices.len(),
            page,
            pages_scanned
        );

        Ok(ListResult {
            page,
            limit,
            notices,
            pages_scanned,
            scraped_at: Utc::now(),
        })
    }

    /// Full content of one notice. Fetch and parse failures are returned.
    pub async fn detail(&self, detail_id: &str) -> Result<NoticeDetail> {
        let html = self
            .fetcher
            .fetch(&self.detail_url, &[(self.detail_id_param.as_str(), detail_id)])
            .await?;
        let detail = self.parser.parse_detail(&html, detail_id)?;
        log::info!(
            "Fetched notice {} ({} attachment(s))",
            detail_id,
            detail.attachment_count()
        );
        Ok(detail)
    }

    /// Notices on the first `pages` listing pages whose fields contain `keyword`.
    pub async fn search(&self, keyword: &str, pages: u32) -> SearchResult {
        let outcome = self.walk(pages).await;
        let total_searched = outcome.records.len();
        let matches = SearchFilter::new(keyword).filter(outcome.records);

        log::info!(
            "Search {:?}: {} of {} notice(s) matched over {} page(s)",
            keyword,
            matches.len(),
            total_searched,
            outcome.pages_scanned
        );

        SearchResult {
            keyword: keyword.to_string(),
            matches,
            pages_scanned: outcome.pages_scanned,
            total_searched,
            scraped_at: Utc::now(),
        }
    }

    /// Per-court counts over the first `pages` listing pages.
    pub async fn stats(&self, pages: u32) -> StatsReport {
        let pages_requested = self.clamp_pages(pages);
        let outcome = self.walk(pages_requested).await;
        let courts = StatsAggregator::aggregate(&outcome.records);

        log::info!(
            "Stats: {} notice(s) across {} court(s) over {} page(s)",
            outcome.records.len(),
            courts.len(),
            outcome.pages_scanned
        );

        StatsReport {
            courts,
            total_notices: outcome.records.len(),
            pages_requested,
            pages_scanned: outcome.pages_scanned,
            scraped_at: Utc::now(),
        }
    }

    async fn walk(&self, pages: u32) -> WalkOutcome<NoticeSummary> {
        let pages = self.clamp_pages(pages);
        PaginationWalker::walk(pages, |page| self.fetch_listing_page(page)).await
    }

    fn clamp_pages(&self, pages: u32) -> u32 {
        if pages > self.max_pages {
            log::debug!("Clamping {} page(s) to {}", pages, self.max_pages);
        }
        pages.min(self.max_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, FetchError, ParseError};
    use crate::services::fixtures::{CannedFetcher, DETAIL_PAGE, REDESIGNED_PAGE, court_rows};

    fn service(fetcher: CannedFetcher) -> (NoticeService, Arc<CannedFetcher>) {
        let fetcher = Arc::new(fetcher);
        let service = NoticeService::new(&Config::default(), fetcher.clone()).unwrap();
        (service, fetcher)
    }

    #[tokio::test]
    async fn test_list_single_page_truncates_to_limit() {
        let (service, fetcher) = service(
            CannedFetcher::default().page("1", Ok(court_rows(1, &["A", "B", "C", "D"]))),
        );

        let result = service.list(1, 2).await.unwrap();
        assert_eq!(result.notices.len(), 2);
        assert_eq!(result.notices[0].detail_id, "100");
        assert_eq!(result.pages_scanned, 1);
        assert_eq!(fetcher.calls(), ["1"]);
    }

    #[tokio::test]
    async fn test_list_walks_following_pages_for_large_limit() {
        let (service, fetcher) = service(
            CannedFetcher::default()
                .page("2", Ok(court_rows(2, &["A", "B"])))
                .page("3", Ok(court_rows(3, &["A", "B"])))
                .page("4", Ok(court_rows(4, &["A", "B"]))),
        );

        let result = service.list(2, 5).await.unwrap();
        let pages: Vec<_> = result.notices.iter().map(|n| n.page_number).collect();
        assert_eq!(pages, [2, 2, 3, 3, 4]);
        assert_eq!(result.pages_scanned, 3);
        assert_eq!(fetcher.calls(), ["2", "3", "4"]);
    }

    #[tokio::test]
    async fn test_list_keeps_partial_follow_up_pages() {
        let (service, _) = service(
            CannedFetcher::default()
                .page("1", Ok(court_rows(1, &["A", "B"])))
                .page("2", Err(FetchError::HttpStatus(502))),
        );

        let result = service.list(1, 10).await.unwrap();
        assert_eq!(result.notices.len(), 2);
        assert_eq!(result.pages_scanned, 1);
    }

    #[tokio::test]
    async fn test_list_on_last_page_number_does_not_walk_further() {
        let last = u32::MAX.to_string();
        let (service, fetcher) = service(
            CannedFetcher::default().page(&last, Ok(court_rows(7, &["A", "B"]))),
        );

        let result = service.list(u32::MAX, 10).await.unwrap();
        assert_eq!(result.notices.len(), 2);
        assert_eq!(result.pages_scanned, 1);
        assert_eq!(fetcher.calls(), [last]);
    }

    #[tokio::test]
    async fn test_list_surfaces_first_page_failure() {
        let (service, _) = service(CannedFetcher::default().page("1", Err(FetchError::Timeout)));
        let err = service.list(1, 10).await.unwrap_err();
        assert!(matches!(err, AppError::Fetch(FetchError::Timeout)));
    }

    #[tokio::test]
    async fn test_detail_parses_page() {
        let (service, fetcher) =
            service(CannedFetcher::default().page("301", Ok(DETAIL_PAGE.to_string())));

        let detail = service.detail("301").await.unwrap();
        assert_eq!(detail.detail_id, "301");
        assert_eq!(detail.court, "서울회생법원");
        assert_eq!(fetcher.calls(), ["301"]);
    }

    #[tokio::test]
    async fn test_detail_surfaces_structure_mismatch() {
        let (service, _) =
            service(CannedFetcher::default().page("9", Ok(REDESIGNED_PAGE.to_string())));
        let err = service.detail("9").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Parse(ParseError::StructureMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_filters_walked_pages() {
        let (service, fetcher) = service(
            CannedFetcher::default()
                .page("1", Ok(court_rows(1, &["수원지방법원", "서울회생법원"])))
                .page("2", Ok(court_rows(2, &["서울회생법원"])))
                .page("3", Err(FetchError::Timeout)),
        );

        let result = service.search("서울", 5).await;
        assert_eq!(result.total_searched, 3);
        assert_eq!(result.match_count(), 2);
        assert_eq!(result.pages_scanned, 2);
        assert_eq!(result.matches[0].detail_id, "101");
        assert_eq!(result.matches[1].detail_id, "200");
        assert_eq!(fetcher.calls(), ["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_stats_aggregates_until_exhaustion() {
        let (service, fetcher) = service(
            CannedFetcher::default()
                .page("1", Ok(court_rows(1, &["A", "B"])))
                .page("2", Ok(court_rows(2, &["A"]))),
        );

        let report = service.stats(3).await;
        assert_eq!(report.total_notices, 3);
        assert_eq!(report.pages_requested, 3);
        assert_eq!(report.pages_scanned, 2);
        assert_eq!(report.courts[0].court, "A");
        assert_eq!(report.courts[0].count, 2);
        assert_eq!(fetcher.calls(), ["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_stats_clamps_page_count() {
        let mut fetcher = CannedFetcher::default();
        for page in 1..=20 {
            fetcher = fetcher.page(&page.to_string(), Ok(court_rows(page, &["A"])));
        }
        let (service, fetcher) = service(fetcher);

        let report = service.stats(50).await;
        assert_eq!(report.pages_requested, 10);
        assert_eq!(report.pages_scanned, 10);
        assert_eq!(fetcher.calls().len(), 10);
    }
}
