// src/services/parser.rs

//! Listing and detail page parser.
//!
//! Anchors come from [`SelectorConfig`] and are compiled once. A missing
//! anchor means the upstream markup drifted and is reported as
//! [`ParseError::StructureMismatch`]; a listing whose body holds no
//! full-width rows (only the "no results" row, or nothing) parses to an empty
//! vector. Full-width rows none of which yield a notice count as drift too.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, ParseError, Result};
use crate::models::{
    Attachment, Config, ListingColumns, NoticeDetail, NoticeSummary, SelectorConfig,
};
use crate::utils::text::{element_text, truncate_graphemes};
use crate::utils::{first_capture, link_extension, numeric_param_pattern, resolve_url};

/// Compiled listing-page anchors.
struct ListingAnchors {
    tables: Vec<Selector>,
    body: Selector,
    row: Selector,
    cell: Selector,
    title_link: Selector,
}

/// Compiled detail-page anchors.
struct DetailAnchors {
    containers: Vec<Selector>,
    titles: Vec<Selector>,
    meta_row: Selector,
    meta_label: Selector,
    meta_value: Selector,
    attachment_link: Selector,
}

/// Parser for upstream listing and detail pages.
pub struct NoticeParser {
    listing: ListingAnchors,
    detail: DetailAnchors,
    columns: ListingColumns,
    detail_id_param: String,
    detail_id_pattern: Regex,
    court_labels: Vec<String>,
    debtor_labels: Vec<String>,
    date_labels: Vec<String>,
    base_url: Url,
    detail_url: Url,
    download_url_template: String,
    download_pattern: Regex,
    attachment_extensions: Vec<String>,
    body_char_limit: Option<usize>,
}

impl NoticeParser {
    /// Build a parser from configuration, compiling every anchor.
    pub fn new(config: &Config) -> Result<Self> {
        let selectors = &config.selectors;
        let base_url = Url::parse(&config.upstream.base_url)?;
        let detail_url = Url::parse(&config.upstream.detail_url())?;
        let download_pattern = Regex::new(r"download\('([^']+)'\s*,\s*'([^']+)'\)")
            .map_err(|e| AppError::config(format!("download pattern: {e}")))?;
        let detail_id_pattern = numeric_param_pattern(&selectors.detail_id_param)
            .map_err(|e| AppError::config(format!("selectors.detail_id_param: {e}")))?;

        Ok(Self {
            listing: Self::listing_anchors(selectors)?,
            detail: Self::detail_anchors(selectors)?,
            columns: selectors.columns.clone(),
            detail_id_param: selectors.detail_id_param.clone(),
            detail_id_pattern,
            court_labels: selectors.court_labels.clone(),
            debtor_labels: selectors.debtor_labels.clone(),
            date_labels: selectors.date_labels.clone(),
            base_url,
            detail_url,
            download_url_template: config.upstream.download_url_template.clone(),
            download_pattern,
            attachment_extensions: config
                .parsing
                .attachment_extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            body_char_limit: config.parsing.body_char_limit,
        })
    }

    fn listing_anchors(selectors: &SelectorConfig) -> Result<ListingAnchors> {
        Ok(ListingAnchors {
            tables: Self::parse_selectors(&selectors.listing_table)?,
            body: Self::parse_selector(&selectors.listing_body)?,
            row: Self::parse_selector(&selectors.listing_row)?,
            cell: Self::parse_selector(&selectors.listing_cell)?,
            title_link: Self::parse_selector(&selectors.title_link)?,
        })
    }

    fn detail_anchors(selectors: &SelectorConfig) -> Result<DetailAnchors> {
        Ok(DetailAnchors {
            containers: Self::parse_selectors(&selectors.detail_container)?,
            titles: Self::parse_selectors(&selectors.detail_title)?,
            meta_row: Self::parse_selector(&selectors.detail_meta_row)?,
            meta_label: Self::parse_selector("th")?,
            meta_value: Self::parse_selector("td")?,
            attachment_link: Self::parse_selector(&selectors.attachment_link)?,
        })
    }

    /// Parse a listing page into summaries, in document order.
    pub fn parse_listing(
        &self,
        html: &str,
        page_number: u32,
    ) -> std::result::Result<Vec<NoticeSummary>, ParseError> {
        let document = Html::parse_document(html);

        let table = Self::first_match(&document, &self.listing.tables)
            .ok_or_else(|| ParseError::missing("listing table"))?;
        let body = table
            .select(&self.listing.body)
            .next()
            .ok_or_else(|| ParseError::missing("listing body"))?;

        let mut full_rows = 0usize;
        let notices: Vec<NoticeSummary> = Self::child_elements(&body, &self.listing.row)
            .filter_map(|row| {
                let cells: Vec<ElementRef> =
                    Self::child_elements(&row, &self.listing.cell).collect();
                if cells.len() < self.columns.required_cells() {
                    log::debug!(
                        "Skipping row with {} cells on page {}",
                        cells.len(),
                        page_number
                    );
                    return None;
                }
                full_rows += 1;
                self.parse_row(&cells, page_number)
            })
            .collect();

        if full_rows > 0 && notices.is_empty() {
            return Err(ParseError::missing("listing row"));
        }
        Ok(notices)
    }

    fn parse_row(&self, cells: &[ElementRef], page_number: u32) -> Option<NoticeSummary> {
        let cols = &self.columns;

        let Some(link) = cells[cols.title].select(&self.listing.title_link).next() else {
            log::debug!("Skipping row without title link on page {}", page_number);
            return None;
        };
        let href = link.value().attr("href").unwrap_or("");
        let Some(detail_id) = first_capture(&self.detail_id_pattern, href) else {
            log::debug!("Skipping row without notice id ({href:?}) on page {page_number}");
            return None;
        };

        let cell_text = |index: usize| element_text(&cells[index]);
        let optional_cell = |index: Option<usize>| {
            index
                .filter(|&i| i < cells.len())
                .map(|i| element_text(&cells[i]))
        };

        Some(NoticeSummary {
            detail_url: self.detail_link(&detail_id),
            detail_id,
            number: cell_text(cols.number),
            court: cell_text(cols.court),
            debtor: cell_text(cols.debtor),
            title: element_text(&link),
            published_date: optional_cell(cols.published_date).unwrap_or_default(),
            views: optional_cell(cols.views),
            page_number,
        })
    }

    /// Parse a detail page.
    pub fn parse_detail(
        &self,
        html: &str,
        detail_id: &str,
    ) -> std::result::Result<NoticeDetail, ParseError> {
        let document = Html::parse_document(html);

        let container = Self::first_match(&document, &self.detail.containers)
            .ok_or_else(|| ParseError::missing("detail container"))?;

        let title = Self::first_match(&document, &self.detail.titles)
            .map(|el| element_text(&el))
            .unwrap_or_default();

        let meta = self.metadata(&document);

        let mut body = element_text(&container);
        if let Some(limit) = self.body_char_limit {
            body = truncate_graphemes(&body, limit);
        }

        Ok(NoticeDetail {
            detail_id: detail_id.to_string(),
            title,
            court: Self::meta_value(&meta, &self.court_labels).unwrap_or_default(),
            debtor: Self::meta_value(&meta, &self.debtor_labels),
            published_date: Self::meta_value(&meta, &self.date_labels).unwrap_or_default(),
            body,
            attachments: self.attachments(&document),
        })
    }

    /// Label/value pairs of the metadata table, in document order.
    fn metadata(&self, document: &Html) -> Vec<(String, String)> {
        document
            .select(&self.detail.meta_row)
            .filter_map(|row| {
                let label = row.select(&self.detail.meta_label).next()?;
                let value = row.select(&self.detail.meta_value).next()?;
                Some((element_text(&label), element_text(&value)))
            })
            .collect()
    }

    /// Value of the first metadata row whose label contains one of `labels`.
    fn meta_value(meta: &[(String, String)], labels: &[String]) -> Option<String> {
        meta.iter()
            .find(|(label, _)| labels.iter().any(|l| label.contains(l.as_str())))
            .map(|(_, value)| value.clone())
    }

    fn attachments(&self, document: &Html) -> Vec<Attachment> {
        document
            .select(&self.detail.attachment_link)
            .filter_map(|link| {
                let href = link.value().attr("href")?;
                if let Some(caps) = self.download_pattern.captures(href) {
                    let stored = caps.get(1)?.as_str();
                    let name = caps.get(2)?.as_str();
                    return Some(Attachment {
                        name: name.to_string(),
                        url: self.download_link(stored, name),
                        stored_name: Some(stored.to_string()),
                    });
                }

                let ext = link_extension(href)?;
                if !self.attachment_extensions.contains(&ext) {
                    return None;
                }
                let url = resolve_url(&self.base_url, href);
                let text = element_text(&link);
                let name = if text.is_empty() {
                    Self::file_name(&url)
                } else {
                    text
                };
                Some(Attachment {
                    name,
                    url,
                    stored_name: None,
                })
            })
            .collect()
    }

    fn detail_link(&self, detail_id: &str) -> String {
        let mut url = self.detail_url.clone();
        url.query_pairs_mut()
            .append_pair(&self.detail_id_param, detail_id);
        url.to_string()
    }

    fn download_link(&self, stored: &str, name: &str) -> String {
        let encode = |s: &str| url::form_urlencoded::byte_serialize(s.as_bytes()).collect::<String>();
        self.download_url_template
            .replace("{base}", self.base_url.as_str().trim_end_matches('/'))
            .replace("{stored}", &encode(stored))
            .replace("{name}", &encode(name))
    }

    fn file_name(url: &str) -> String {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        path.rsplit('/').next().unwrap_or(path).to_string()
    }

    fn first_match<'a>(document: &'a Html, selectors: &[Selector]) -> Option<ElementRef<'a>> {
        selectors
            .iter()
            .find_map(|selector| document.select(selector).next())
    }

    fn child_elements<'a>(
        parent: &ElementRef<'a>,
        selector: &'a Selector,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        parent
            .children()
            .filter_map(ElementRef::wrap)
            .filter(move |child| selector.matches(child))
    }

    fn parse_selectors(list: &[String]) -> Result<Vec<Selector>> {
        list.iter().map(|s| Self::parse_selector(s)).collect()
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}
