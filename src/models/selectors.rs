// src/models/selectors.rs

//! CSS anchors for scraping the upstream listing and detail pages.
//!
//! Every list-valued anchor is a fallback chain: the first selector that
//! matches wins. When none match, the parser reports a structure mismatch.

use serde::{Deserialize, Serialize};

/// CSS selectors and column layout for the upstream pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Listing table, tried in order
    #[serde(default = "defaults::listing_table")]
    pub listing_table: Vec<String>,

    /// Body element inside the listing table
    #[serde(default = "defaults::listing_body")]
    pub listing_body: String,

    /// Row element inside the listing body
    #[serde(default = "defaults::listing_row")]
    pub listing_row: String,

    /// Cell element inside a row
    #[serde(default = "defaults::listing_cell")]
    pub listing_cell: String,

    /// Link element inside the title cell
    #[serde(default = "defaults::title_link")]
    pub title_link: String,

    /// Query parameter of the title link holding the notice id
    #[serde(default = "defaults::detail_id_param")]
    pub detail_id_param: String,

    /// Column positions inside a listing row
    #[serde(default)]
    pub columns: ListingColumns,

    /// Detail body container, tried in order
    #[serde(default = "defaults::detail_container")]
    pub detail_container: Vec<String>,

    /// Detail title, tried in order
    #[serde(default = "defaults::detail_title")]
    pub detail_title: Vec<String>,

    /// Label/value rows of the detail metadata table
    #[serde(default = "defaults::detail_meta_row")]
    pub detail_meta_row: String,

    /// Labels identifying the court row of the metadata table
    #[serde(default = "defaults::court_labels")]
    pub court_labels: Vec<String>,

    /// Labels identifying the debtor row of the metadata table
    #[serde(default = "defaults::debtor_labels")]
    pub debtor_labels: Vec<String>,

    /// Labels identifying the publication date row of the metadata table
    #[serde(default = "defaults::date_labels")]
    pub date_labels: Vec<String>,

    /// Candidate attachment links on the detail page
    #[serde(default = "defaults::attachment_link")]
    pub attachment_link: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing_table: defaults::listing_table(),
            listing_body: defaults::listing_body(),
            listing_row: defaults::listing_row(),
            listing_cell: defaults::listing_cell(),
            title_link: defaults::title_link(),
            detail_id_param: defaults::detail_id_param(),
            columns: ListingColumns::default(),
            detail_container: defaults::detail_container(),
            detail_title: defaults::detail_title(),
            detail_meta_row: defaults::detail_meta_row(),
            court_labels: defaults::court_labels(),
            debtor_labels: defaults::debtor_labels(),
            date_labels: defaults::date_labels(),
            attachment_link: defaults::attachment_link(),
        }
    }
}

/// Zero-based column positions of a listing row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingColumns {
    pub number: usize,
    pub court: usize,
    pub debtor: usize,
    pub title: usize,

    /// Publication date column, if the listing has one
    #[serde(default)]
    pub published_date: Option<usize>,

    /// View counter column, if the listing has one
    #[serde(default)]
    pub views: Option<usize>,
}

impl Default for ListingColumns {
    fn default() -> Self {
        Self {
            number: 0,
            court: 1,
            debtor: 2,
            title: 3,
            published_date: None,
            views: Some(4),
        }
    }
}

impl ListingColumns {
    /// Number of cells a row needs before it is considered a notice row.
    pub fn required_cells(&self) -> usize {
        [self.number, self.court, self.debtor, self.title]
            .into_iter()
            .chain(self.published_date)
            .chain(self.views)
            .max()
            .map_or(0, |max| max + 1)
    }
}

mod defaults {
    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    pub fn listing_table() -> Vec<String> {
        strings(&["table.tableHor", "table"])
    }
    pub fn listing_body() -> String {
        "tbody".into()
    }
    pub fn listing_row() -> String {
        "tr".into()
    }
    pub fn listing_cell() -> String {
        "td".into()
    }
    pub fn title_link() -> String {
        "a".into()
    }
    pub fn detail_id_param() -> String {
        "seq_id".into()
    }
    pub fn detail_container() -> Vec<String> {
        strings(&["div.view_cont", "div.content"])
    }
    pub fn detail_title() -> Vec<String> {
        strings(&["h3.tit", "h2"])
    }
    pub fn detail_meta_row() -> String {
        "table tr".into()
    }
    pub fn court_labels() -> Vec<String> {
        strings(&["법원", "관할법원"])
    }
    pub fn debtor_labels() -> Vec<String> {
        strings(&["채무자", "파산자"])
    }
    pub fn date_labels() -> Vec<String> {
        strings(&["공고일", "게시일", "등록일"])
    }
    pub fn attachment_link() -> String {
        "a[href]".into()
    }
}
