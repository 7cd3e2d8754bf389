//! Notice data structures.

use serde::{Deserialize, Serialize};

/// One row of an upstream listing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeSummary {
    /// Upstream `seq_id`, the key used to fetch the full notice
    pub detail_id: String,

    /// Row number as displayed on the listing
    pub number: String,

    /// Court that published the notice
    pub court: String,

    /// Debtor (estate) name
    pub debtor: String,

    /// Notice title
    pub title: String,

    /// Publication date as displayed, empty when the listing has no date column
    pub published_date: String,

    /// View count as displayed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<String>,

    /// Absolute URL of the detail page
    pub detail_url: String,

    /// Listing page this row was found on at fetch time
    pub page_number: u32,
}

impl NoticeSummary {
    /// Format notice for display using a template.
    ///
    /// Supported placeholders:
    /// - `{id}`, `{number}`, `{court}`, `{debtor}`
    /// - `{title}`, `{date}`, `{link}`, `{page}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{id}", &self.detail_id)
            .replace("{number}", &self.number)
            .replace("{court}", &self.court)
            .replace("{debtor}", &self.debtor)
            .replace("{title}", &self.title)
            .replace("{date}", &self.published_date)
            .replace("{link}", &self.detail_url)
            .replace("{page}", &self.page_number.to_string())
    }
}

/// A downloadable file attached to a notice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    /// Original file name shown to users
    pub name: String,

    /// Absolute download URL
    pub url: String,

    /// Server-side file name passed to the upstream download script
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_name: Option<String>,
}

/// Full content of one notice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeDetail {
    pub detail_id: String,
    pub title: String,
    pub court: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtor: Option<String>,

    pub published_date: String,

    /// Plain-text notice body
    pub body: String,

    pub attachments: Vec<Attachment>,
}

impl NoticeDetail {
    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }
}
