//! HTML front-page and article-page extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{accept_title, non_empty, Draft};
use crate::client::absolutize_url;
use crate::normalize::fold_curly_quotes;

/// Record containers, most specific first. The first selector that matches
/// anything on the page defines the record set.
const ARTICLE_CONTAINERS: &[&str] = &[
    "article",
    ".post",
    ".article",
    ".entry",
    r#"[class*="article"]"#,
    r#"[class*="post"]"#,
];

/// Article-page body containers for the content fetch, tried in order.
const CONTENT_CONTAINERS: &[&str] = &[
    ".entry-content",
    ".post-content",
    ".article-content",
    ".content",
    "article p",
    "main p",
];

/// Joined text must exceed this many characters to stop the content search early.
const MIN_CONTENT_CHARS: usize = 100;

/// Anchor-fallback titles must exceed this many characters.
const MIN_ANCHOR_TEXT_CHARS: usize = 20;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

static ARTICLE_SELECTORS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| ARTICLE_CONTAINERS.iter().copied().map(selector).collect());
static CONTENT_SELECTORS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| CONTENT_CONTAINERS.iter().copied().map(selector).collect());
static TITLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"h1, h2, h3, .title, [class*="title"]"#));
static LINK_SEL: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static FULL_BODY_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(".entry-content, .post-content, .article-content"));
static SUMMARY_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(r#".excerpt, [class*="excerpt"], .entry-summary, .summary"#));
static PARAGRAPH_SEL: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static DATETIME_SEL: LazyLock<Selector> = LazyLock::new(|| selector("time[datetime]"));
static DATE_TEXT_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"time, .date, [class*="date"]"#));
static AUTHOR_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(r#".author, [rel="author"], .byline"#));
static CATEGORY_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[rel~="tag"], .category, .categories a, .cat-links a"#));
static IMG_SEL: LazyLock<Selector> = LazyLock::new(|| selector("img"));

/// Extracts up to `limit` drafts from a rendered listing page.
///
/// When no container selector produces a usable record, falls back to
/// long-text anchors anywhere on the page. Inline images are resolved
/// against `base_origin`; links are left as found.
#[must_use]
pub fn parse_page(html: &str, base_origin: &str, limit: usize) -> Vec<Draft> {
    let document = Html::parse_document(html);
    let mut drafts = Vec::new();

    for container in ARTICLE_SELECTORS.iter() {
        let mut records = document.select(container).peekable();
        if records.peek().is_none() {
            continue;
        }
        for record in records {
            match draft_from_record(record, base_origin) {
                Some(draft) => drafts.push(draft),
                None => tracing::debug!("skipping page record without a usable title"),
            }
            if drafts.len() >= limit {
                break;
            }
        }
        break;
    }

    if drafts.is_empty() {
        drafts = anchor_fallback(&document, limit);
        tracing::debug!(count = drafts.len(), "used anchor fallback for page");
    }

    drafts
}

/// Pulls the main body markup out of a single article page.
///
/// Each container selector is tried in order; matches are joined with a
/// blank line. The search stops at the first selector whose text exceeds
/// 100 characters, otherwise the last non-empty match wins.
#[must_use]
pub fn extract_article_body(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let mut found = None;

    for container in CONTENT_SELECTORS.iter() {
        let elements: Vec<ElementRef<'_>> = document
            .select(container)
            .filter(|el| !collapsed_text(*el).is_empty())
            .collect();
        if elements.is_empty() {
            continue;
        }

        let text_chars: usize = elements
            .iter()
            .map(|el| collapsed_text(*el).chars().count())
            .sum();
        let markup = elements
            .iter()
            .map(|el| {
                if el.value().name() == "p" {
                    el.html()
                } else {
                    el.inner_html()
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        found = Some(markup);
        if text_chars > MIN_CONTENT_CHARS {
            break;
        }
    }

    found
}

fn draft_from_record(record: ElementRef<'_>, base_origin: &str) -> Option<Draft> {
    let title_el = record.select(&TITLE_SEL).next();
    let title = title_el
        .and_then(|el| accept_title(&collapsed_text(el)))
        .or_else(|| {
            record
                .select(&LINK_SEL)
                .find_map(|a| accept_title(&collapsed_text(a)))
        })?;

    let link = title_el.and_then(first_href).or_else(|| first_href(record));

    let body = record
        .select(&FULL_BODY_SEL)
        .find_map(|el| non_empty(&el.inner_html()))
        .or_else(|| {
            record
                .select(&SUMMARY_SEL)
                .find_map(|el| non_empty(&el.inner_html()))
        })
        .or_else(|| {
            let paragraphs = record
                .select(&PARAGRAPH_SEL)
                .filter(|p| !collapsed_text(*p).is_empty())
                .map(|p| p.html())
                .collect::<Vec<_>>();
            non_empty(&paragraphs.join("\n"))
        })
        .unwrap_or_default();

    let published = record
        .select(&DATETIME_SEL)
        .find_map(|el| el.value().attr("datetime").and_then(non_empty))
        .or_else(|| {
            record
                .select(&DATE_TEXT_SEL)
                .find_map(|el| non_empty(&collapsed_text(el)))
        });

    let author = record
        .select(&AUTHOR_SEL)
        .find_map(|el| non_empty(&fold_curly_quotes(strip_byline(&collapsed_text(el)))));

    let image_url = record.select(&IMG_SEL).find_map(|img| {
        img.value()
            .attr("src")
            .or_else(|| img.value().attr("data-src"))
            .and_then(|src| absolutize_url(base_origin, src))
    });

    Some(Draft {
        title,
        link,
        body,
        published,
        author,
        categories: record_categories(record),
        image_url,
    })
}

/// Category labels from tag/category links, then from WordPress
/// `category-<slug>` classes on the record itself. Duplicates are dropped
/// case-insensitively, keeping the first spelling.
fn record_categories(record: ElementRef<'_>) -> Vec<String> {
    let from_links = record
        .select(&CATEGORY_SEL)
        .filter_map(|el| non_empty(&collapsed_text(el)));
    let from_classes = record
        .value()
        .classes()
        .filter_map(|class| class.strip_prefix("category-"))
        .filter_map(|slug| non_empty(&slug.replace('-', " ")));

    let mut seen = HashSet::new();
    from_links
        .chain(from_classes)
        .filter(|label| seen.insert(label.to_lowercase()))
        .collect()
}

fn anchor_fallback(document: &Html, limit: usize) -> Vec<Draft> {
    let mut seen_links = HashSet::new();
    let mut drafts = Vec::new();

    for anchor in document.select(&LINK_SEL) {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        let lower = href.to_ascii_lowercase();
        if href.is_empty()
            || href.contains('#')
            || lower.starts_with("mailto:")
            || lower.starts_with("javascript:")
        {
            continue;
        }

        let text = collapsed_text(anchor);
        if text.chars().count() <= MIN_ANCHOR_TEXT_CHARS {
            continue;
        }
        let Some(title) = accept_title(&text) else {
            continue;
        };
        if !seen_links.insert(href.to_string()) {
            continue;
        }

        drafts.push(Draft {
            title,
            link: Some(href.to_string()),
            ..Draft::default()
        });
        if drafts.len() >= limit {
            break;
        }
    }

    drafts
}

fn first_href(el: ElementRef<'_>) -> Option<String> {
    if el.value().name() == "a" {
        if let Some(href) = el.value().attr("href").and_then(non_empty) {
            return Some(href);
        }
    }
    el.select(&LINK_SEL)
        .find_map(|a| a.value().attr("href").and_then(non_empty))
}

fn collapsed_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_byline(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("by ") => trimmed[3..].trim_start(),
        _ => trimmed,
    }
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
