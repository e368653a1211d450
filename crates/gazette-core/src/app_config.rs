use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which upstream form the article list is scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// The site's RSS 2.0 feed, with per-article image resolution.
    #[default]
    Rss,
    /// The site's rendered HTML front page.
    Page,
}

impl SourceKind {
    /// Short label used in article ids and log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Rss => "rss",
            SourceKind::Page => "page",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rss" | "feed" => Ok(SourceKind::Rss),
            "page" | "html" => Ok(SourceKind::Page),
            other => Err(format!("unknown source kind \"{other}\" (expected rss or page)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Origin of the newspaper site, e.g. `https://dalgazette.com`.
    pub site_base_url: String,
    pub feed_path: String,
    pub source: SourceKind,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Byline used when an article carries no author.
    pub staff_author: String,
}

impl AppConfig {
    /// Absolute URL of the RSS feed.
    #[must_use]
    pub fn feed_url(&self) -> String {
        format!(
            "{}/{}",
            self.site_base_url.trim_end_matches('/'),
            self.feed_path.trim_start_matches('/')
        )
    }
}
