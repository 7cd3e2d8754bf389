//! Keyword filter over listing records.

use crate::models::NoticeSummary;
use crate::utils::text::fold_for_match;

/// Case- and width-insensitive substring filter.
///
/// A record matches when the folded keyword occurs in its title, court or
/// debtor. Input order is kept; nothing is ranked.
pub struct SearchFilter {
    needle: String,
}

impl SearchFilter {
    pub fn new(keyword: &str) -> Self {
        Self {
            needle: fold_for_match(keyword),
        }
    }

    pub fn matches(&self, notice: &NoticeSummary) -> bool {
        [&notice.title, &notice.court, &notice.debtor]
            .into_iter()
            .any(|field| fold_for_match(field).contains(&self.needle))
    }

    /// Keep the records that match, in their original order.
    pub fn filter(&self, records: Vec<NoticeSummary>) -> Vec<NoticeSummary> {
        records.into_iter().filter(|n| self.matches(n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(id: &str, title: &str, court: &str, debtor: &str) -> NoticeSummary {
        NoticeSummary {
            detail_id: id.to_string(),
            number: id.to_string(),
            court: court.to_string(),
            debtor: debtor.to_string(),
            title: title.to_string(),
            published_date: String::new(),
            views: None,
            detail_url: format!("https://example.com/view?seq_id={id}"),
            page_number: 1,
        }
    }

    #[test]
    fn test_matches_korean_title() {
        let filter = SearchFilter::new("부동산");
        assert!(filter.matches(&notice("1", "서울 부동산 매각", "서울회생법원", "김씨")));
        assert!(!filter.matches(&notice("2", "차량 매각", "서울회생법원", "김씨")));
    }

    #[test]
    fn test_matches_ignoring_case_and_width() {
        let record = notice("1", "ＡＰＴ 매각 (Gangnam)", "서울회생법원", "김씨");
        assert!(SearchFilter::new("apt").matches(&record));
        assert!(SearchFilter::new("GANGNAM").matches(&record));
        assert!(SearchFilter::new("ａｐｔ　매각").matches(&record));
    }

    #[test]
    fn test_matches_court_and_debtor() {
        let record = notice("1", "채권 매각", "수원지방법원", "주식회사 한빛");
        assert!(SearchFilter::new("수원").matches(&record));
        assert!(SearchFilter::new("한빛").matches(&record));
    }

    #[test]
    fn test_filter_preserves_order() {
        let records = vec![
            notice("1", "토지 매각", "A", "x"),
            notice("2", "차량", "B", "y"),
            notice("3", "토지 및 건물", "C", "z"),
            notice("4", "토지", "D", "w"),
        ];
        let ids: Vec<_> = SearchFilter::new("토지")
            .filter(records)
            .into_iter()
            .map(|n| n.detail_id)
            .collect();
        assert_eq!(ids, ["1", "3", "4"]);
    }
}
