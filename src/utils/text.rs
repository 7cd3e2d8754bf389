// src/utils/text.rs

//! Text normalization for scraped fields and keyword matching.

use scraper::{ElementRef, Node};
use unicode_segmentation::UnicodeSegmentation;

/// Collapse all whitespace runs to a single space and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Elements that start a new line when rendered.
const BLOCK_ELEMENTS: &[&str] = &[
    "br", "p", "div", "li", "tr", "td", "th", "h1", "h2", "h3", "h4", "table",
];

/// Visible text of an element with whitespace collapsed.
///
/// Text inside `<script>` and `<style>` is skipped; block elements act as
/// word breaks so adjacent paragraphs do not run together.
pub fn element_text(element: &ElementRef) -> String {
    let mut raw = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => {
                let hidden = node
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .any(|el| matches!(el.value().name(), "script" | "style"));
                if !hidden {
                    raw.push_str(text);
                }
            }
            Node::Element(el) if BLOCK_ELEMENTS.contains(&el.name()) => raw.push(' '),
            _ => {}
        }
    }
    normalize_whitespace(&raw)
}

/// Fold a string for case- and width-insensitive comparison.
///
/// Full-width ASCII (U+FF01..=U+FF5E) maps to its half-width form, the
/// ideographic space maps to a space, whitespace is collapsed and the result
/// is lower-cased.
pub fn fold_for_match(s: &str) -> String {
    let half_width: String = s
        .chars()
        .map(|c| match c {
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            '\u{3000}' => ' ',
            _ => c,
        })
        .collect();
    normalize_whitespace(&half_width).to_lowercase()
}

/// Truncate to at most `limit` user-perceived characters.
pub fn truncate_graphemes(s: &str, limit: usize) -> String {
    s.graphemes(true).take(limit).collect()
}
