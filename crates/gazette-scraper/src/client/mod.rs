//! HTTP client used for every upstream fetch: the feed, the front page,
//! and individual article pages.

mod urls;

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

pub use urls::{absolutize_url, host_of, site_origin, strip_query};

/// Plain GET-as-text client with a fixed timeout and browser-like headers.
///
/// Non-2xx responses are returned as [`ScraperError::UnexpectedStatus`].
/// No retries are attempted; callers decide how to degrade.
#[derive(Debug, Clone)]
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`]: `url` is not an absolute http(s) URL.
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx status.
    /// - [`ScraperError::Http`]: network, timeout, or body decoding failure.
    pub async fn fetch_text(&self, url: &str) -> Result<String, ScraperError> {
        Self::validate_url(url)?;

        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url, bytes = body.len(), "fetched upstream document");
        Ok(body)
    }

    fn validate_url(url: &str) -> Result<(), ScraperError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ScraperError::InvalidUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme \"{other}\""),
            }),
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
