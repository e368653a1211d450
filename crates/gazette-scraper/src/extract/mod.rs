//! Record-level extraction: one RSS `<item>` or one HTML article block in,
//! one [`Draft`] out.

mod page;
mod rss;

pub use page::{extract_article_body, parse_page};
pub use rss::parse_feed;

use crate::normalize::fold_curly_quotes;

/// Maximum number of valid records taken from one source document.
pub const MAX_ARTICLES: usize = 10;

/// Titles must be strictly longer than this many characters.
pub const MIN_TITLE_CHARS: usize = 10;

/// A candidate article before normalization, classification, and date parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    /// As found in the source; may be relative.
    pub link: Option<String>,
    /// Highest-priority non-empty body field, still raw markup.
    pub body: String,
    pub published: Option<String>,
    pub author: Option<String>,
    pub categories: Vec<String>,
    /// Inline image already resolved to an absolute URL.
    pub image_url: Option<String>,
}

/// Collapses internal whitespace, folds curly quotes, and rejects titles of
/// [`MIN_TITLE_CHARS`] characters or fewer.
pub(crate) fn accept_title(raw: &str) -> Option<String> {
    let title = fold_curly_quotes(&raw.split_whitespace().collect::<Vec<_>>().join(" "));
    (title.chars().count() > MIN_TITLE_CHARS).then_some(title)
}

/// Trims and drops empty strings.
pub(crate) fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
