//! Drives extraction, normalization, classification, date resolution and
//! image lookup over one source document, and degrades to the fallback set
//! when the source cannot be used.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use gazette_core::{AppConfig, Article, SourceKind};
use sha2::{Digest, Sha256};

use crate::classify::{classify, join_hints};
use crate::client::{absolutize_url, site_origin, PageClient};
use crate::dates::resolve_date_at;
use crate::error::ScraperError;
use crate::extract::{extract_article_body, parse_feed, parse_page, Draft, MAX_ARTICLES};
use crate::fallback::fallback_articles;
use crate::images::ImageResolver;
use crate::normalize::{normalize_content, placeholder_content};

/// Returned by [`GazetteScraper::fetch_article_content`] when the page has
/// no recognizable body.
pub const CONTENT_UNAVAILABLE: &str = "Content could not be extracted from this article.";

/// Returned by [`GazetteScraper::fetch_article_content`] when the article
/// page could not be loaded (timeout, connection failure, non-2xx status).
pub const CONTENT_LOAD_FAILED: &str = "Error loading article content.";

/// Whether a batch came from the live site or the static placeholder set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOrigin {
    Live,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct ArticleBatch {
    pub articles: Vec<Article>,
    pub origin: BatchOrigin,
}

/// Article scraper for one newspaper site.
///
/// Every call is independent; the struct only holds configuration and a
/// reusable HTTP client.
#[derive(Debug, Clone)]
pub struct GazetteScraper {
    client: PageClient,
    images: ImageResolver,
    site_origin: String,
    feed_url: String,
    staff_author: String,
}

impl GazetteScraper {
    /// Builds a scraper from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let client = PageClient::new(config.request_timeout_secs, &config.user_agent)?;
        Ok(Self::new(
            client,
            &config.site_base_url,
            &config.feed_url(),
            &config.staff_author,
        ))
    }

    #[must_use]
    pub fn new(client: PageClient, site_base_url: &str, feed_url: &str, staff_author: &str) -> Self {
        Self {
            images: ImageResolver::new(client.clone(), site_base_url),
            client,
            site_origin: site_origin(site_base_url),
            feed_url: feed_url.to_owned(),
            staff_author: staff_author.to_owned(),
        }
    }

    /// Fetches articles from `source`, never failing.
    ///
    /// A fetch or parse error, or a source that yields no usable records,
    /// produces the fallback set instead.
    pub async fn fetch_articles(&self, source: SourceKind) -> ArticleBatch {
        let result = match source {
            SourceKind::Rss => self.scrape_feed().await,
            SourceKind::Page => self.scrape_page().await,
        };

        match result {
            Ok(articles) if !articles.is_empty() => {
                tracing::info!(source = %source, count = articles.len(), "scraped live articles");
                ArticleBatch {
                    articles,
                    origin: BatchOrigin::Live,
                }
            }
            Ok(_) => {
                tracing::warn!(source = %source, "source yielded no articles; serving fallback set");
                self.fallback_batch()
            }
            Err(e) => {
                tracing::warn!(source = %source, error = %e, "scrape failed; serving fallback set");
                self.fallback_batch()
            }
        }
    }

    /// Scrapes the RSS feed, then looks up a lead image for each linked
    /// article, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the feed cannot be fetched or is not
    /// well-formed XML. Image lookups never fail the batch.
    pub async fn scrape_feed(&self) -> Result<Vec<Article>, ScraperError> {
        let xml = self.client.fetch_text(&self.feed_url).await?;
        let drafts = parse_feed(&xml, MAX_ARTICLES)?;
        let mut articles = self.assemble(drafts, SourceKind::Rss, Utc::now());

        for article in &mut articles {
            if let Some(url) = article.url.as_deref() {
                article.image_url = self.images.resolve(url).await;
            }
        }

        Ok(articles)
    }

    /// Scrapes the rendered front page.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the page cannot be fetched.
    pub async fn scrape_page(&self) -> Result<Vec<Article>, ScraperError> {
        let html = self.client.fetch_text(&self.site_origin).await?;
        let drafts = parse_page(&html, &self.site_origin, MAX_ARTICLES);
        Ok(self.assemble(drafts, SourceKind::Page, Utc::now()))
    }

    /// Fetches one article page and returns its normalized body.
    ///
    /// A page with no body container yields [`CONTENT_UNAVAILABLE`]; a page
    /// that cannot be loaded yields [`CONTENT_LOAD_FAILED`].
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if `url` is not an absolute
    /// http(s) URL.
    pub async fn fetch_article_content(&self, url: &str) -> Result<String, ScraperError> {
        let html = match self.client.fetch_text(url.trim()).await {
            Ok(html) => html,
            Err(e @ (ScraperError::Http(_) | ScraperError::UnexpectedStatus { .. })) => {
                tracing::warn!(url, error = %e, "article page could not be loaded");
                return Ok(CONTENT_LOAD_FAILED.to_string());
            }
            Err(e) => return Err(e),
        };
        let content = extract_article_body(&html)
            .map(|body| normalize_content(&body).content)
            .filter(|content| !content.is_empty());
        if content.is_none() {
            tracing::debug!(url, "no article body found");
        }
        Ok(content.unwrap_or_else(|| CONTENT_UNAVAILABLE.to_string()))
    }

    fn fallback_batch(&self) -> ArticleBatch {
        ArticleBatch {
            articles: fallback_articles(Utc::now(), &self.staff_author),
            origin: BatchOrigin::Fallback,
        }
    }

    fn assemble(&self, drafts: Vec<Draft>, source: SourceKind, now: DateTime<Utc>) -> Vec<Article> {
        let mut seen_ids: HashMap<String, usize> = HashMap::new();
        drafts
            .into_iter()
            .map(|draft| {
                let id = article_id(source, &draft.title, &mut seen_ids);
                self.build_article(draft, id, now)
            })
            .collect()
    }

    fn build_article(&self, draft: Draft, id: String, now: DateTime<Utc>) -> Article {
        let mut body = normalize_content(&draft.body);
        if body.content.is_empty() {
            body = placeholder_content(&draft.title);
        }

        let category = classify(&join_hints(&draft.categories), &draft.title);
        let tags = if draft.categories.is_empty() {
            vec![category.label().to_lowercase()]
        } else {
            draft.categories.iter().map(|c| c.to_lowercase()).collect()
        };

        Article {
            id,
            excerpt: body.excerpt,
            content: body.content,
            category,
            author: draft.author.unwrap_or_else(|| self.staff_author.clone()),
            published_at: resolve_date_at(draft.published.as_deref().unwrap_or_default(), now),
            image_url: draft.image_url,
            tags,
            url: draft
                .link
                .as_deref()
                .and_then(|link| absolutize_url(&self.site_origin, link)),
            title: draft.title,
        }
    }
}

/// Stable id: `<source>-<first 12 hex chars of SHA-256(source|title)>`.
/// Repeated titles within one batch get a `-2`, `-3`, ... suffix.
fn article_id(source: SourceKind, title: &str, seen: &mut HashMap<String, usize>) -> String {
    let digest = format!("{:x}", Sha256::digest(format!("{source}|{title}").as_bytes()));
    let base = format!("{source}-{}", &digest[..12]);
    let count = seen.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        base
    } else {
        format!("{base}-{count}")
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
