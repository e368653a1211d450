//! Lead-image lookup: scans an article page for an on-site image URL.

use std::sync::LazyLock;

use regex::Regex;

use crate::client::{absolutize_url, host_of, site_origin, strip_query, PageClient};

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid regex"));
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex"));

static SRC_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| attr_regex("src"));
static CLASS_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| attr_regex("class"));
static CONTENT_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| attr_regex("content"));
static PROPERTY_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| attr_regex("property"));
static NAME_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| attr_regex("name"));

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];

/// Where on the page an image reference was found, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageSource {
    OgImage,
    TwitterImage,
    FeaturedImg,
    WpPostImage,
    UploadsImg,
    AnyImg,
}

const SOURCE_PRIORITY: [ImageSource; 6] = [
    ImageSource::OgImage,
    ImageSource::TwitterImage,
    ImageSource::FeaturedImg,
    ImageSource::WpPostImage,
    ImageSource::UploadsImg,
    ImageSource::AnyImg,
];

/// Finds a lead image for an article by fetching its page.
///
/// Every failure mode (network error, non-2xx, no matching tag, off-site or
/// non-image URL) resolves to `None`.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    client: PageClient,
    base_origin: String,
    expected_host: String,
}

impl ImageResolver {
    /// `site_base_url` supplies both the origin used for root-relative
    /// references and the host every accepted image must live under.
    #[must_use]
    pub fn new(client: PageClient, site_base_url: &str) -> Self {
        let base_origin = site_origin(site_base_url);
        let expected_host = host_of(&base_origin).unwrap_or_default();
        Self {
            client,
            base_origin,
            expected_host,
        }
    }

    /// Fetches `article_url` (query string removed) and scans it for an image.
    pub async fn resolve(&self, article_url: &str) -> Option<String> {
        let url = strip_query(article_url);
        let html = match self.client.fetch_text(url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::debug!(url, error = %e, "image lookup fetch failed");
                return None;
            }
        };
        let found = extract_image_url(&html, &self.base_origin, &self.expected_host);
        tracing::debug!(url, image = ?found, "image lookup finished");
        found
    }
}

/// Scans page HTML for the first acceptable image reference.
///
/// Candidates are tried by source priority (Open Graph, Twitter card,
/// `featured` class, `wp-post-image` class, uploads path, any image), each
/// source in document order. A candidate is accepted once normalized to an
/// absolute URL whose host is `expected_host` (or a subdomain of it) and
/// whose path ends in a known image extension.
#[must_use]
pub fn extract_image_url(html: &str, base_origin: &str, expected_host: &str) -> Option<String> {
    SOURCE_PRIORITY.iter().find_map(|&source| {
        candidates_for(html, source)
            .into_iter()
            .filter_map(|raw| absolutize_url(base_origin, &raw))
            .find(|url| is_acceptable(url, expected_host))
    })
}

fn candidates_for(html: &str, source: ImageSource) -> Vec<String> {
    match source {
        ImageSource::OgImage => meta_contents(html, &[("property", "og:image")]),
        ImageSource::TwitterImage => meta_contents(
            html,
            &[("name", "twitter:image"), ("property", "twitter:image")],
        ),
        ImageSource::FeaturedImg => img_sources(html, |tag, _| class_contains(tag, "featured")),
        ImageSource::WpPostImage => {
            img_sources(html, |tag, _| class_contains(tag, "wp-post-image"))
        }
        ImageSource::UploadsImg => img_sources(html, |_, src| src.contains("wp-content/uploads")),
        ImageSource::AnyImg => img_sources(html, |_, src| has_image_extension(src)),
    }
}

fn meta_contents(html: &str, keys: &[(&str, &str)]) -> Vec<String> {
    META_TAG_RE
        .find_iter(html)
        .filter_map(|m| {
            let tag = m.as_str();
            let matches_key = keys.iter().any(|(attr, value)| {
                extract_attr(tag, attr).is_some_and(|v| v.eq_ignore_ascii_case(value))
            });
            if matches_key {
                extract_attr(tag, "content")
            } else {
                None
            }
        })
        .collect()
}

fn img_sources<F>(html: &str, keep: F) -> Vec<String>
where
    F: Fn(&str, &str) -> bool,
{
    IMG_TAG_RE
        .find_iter(html)
        .filter_map(|m| {
            let tag = m.as_str();
            let src = extract_attr(tag, "src")?;
            keep(tag, &src).then_some(src)
        })
        .collect()
}

fn class_contains(tag: &str, needle: &str) -> bool {
    extract_attr(tag, "class").is_some_and(|class| class.to_ascii_lowercase().contains(needle))
}

/// Matches ` attr="value"` with either quote style. The leading whitespace
/// requirement keeps `data-src` from matching `src`.
fn attr_regex(attr: &str) -> Regex {
    Regex::new(&format!(r#"(?is)(?:^|\s){attr}\s*=\s*["']([^"']+)["']"#)).expect("valid regex")
}

fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    let re: &Regex = match attr {
        "src" => &SRC_ATTR_RE,
        "class" => &CLASS_ATTR_RE,
        "content" => &CONTENT_ATTR_RE,
        "property" => &PROPERTY_ATTR_RE,
        "name" => &NAME_ATTR_RE,
        _ => return None,
    };
    re.captures(tag)
        .and_then(|c| c.get(1).map(|m| m.as_str().trim().to_string()))
}

fn has_image_extension(url: &str) -> bool {
    let path = strip_query(url).to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

fn is_acceptable(url: &str, expected_host: &str) -> bool {
    let Some(host) = host_of(url) else {
        return false;
    };
    let on_site = expected_host.is_empty()
        || host == expected_host
        || host.ends_with(&format!(".{expected_host}"));
    on_site && has_image_extension(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://dalgazette.com";
    const HOST: &str = "dalgazette.com";

    #[test]
    fn scheme_relative_og_image_is_made_https() {
        let html = r#"<meta property="og:image" content="//cdn.site.com/a.jpg">"#;
        assert_eq!(
            extract_image_url(html, "https://site.com", "site.com").as_deref(),
            Some("https://cdn.site.com/a.jpg")
        );
    }

    #[test]
    fn no_pattern_yields_none() {
        let html = "<html><body><p>No pictures here.</p></body></html>";
        assert_eq!(extract_image_url(html, BASE, HOST), None);
    }

    #[test]
    fn og_image_beats_twitter_and_inline_images() {
        let html = r#"
            <img class="featured" src="/wp-content/uploads/featured.jpg">
            <meta name="twitter:image" content="https://dalgazette.com/tw.png">
            <meta content="https://dalgazette.com/og.webp" property="og:image">
        "#;
        assert_eq!(
            extract_image_url(html, BASE, HOST).as_deref(),
            Some("https://dalgazette.com/og.webp")
        );
    }

    #[test]
    fn twitter_image_used_when_og_missing() {
        let html = r#"<meta name="twitter:image" content="https://dalgazette.com/tw.png">"#;
        assert_eq!(
            extract_image_url(html, BASE, HOST).as_deref(),
            Some("https://dalgazette.com/tw.png")
        );
    }

    #[test]
    fn featured_class_beats_wp_post_image() {
        let html = r#"
            <img class="attachment-large wp-post-image" src="/wp-content/uploads/post.jpg">
            <img src="/wp-content/uploads/hero.jpeg" class="hero featured-image">
        "#;
        assert_eq!(
            extract_image_url(html, BASE, HOST).as_deref(),
            Some("https://dalgazette.com/wp-content/uploads/hero.jpeg")
        );
    }

    #[test]
    fn uploads_path_beats_generic_image() {
        let html = r#"
            <img src="/static/logo.png">
            <img src="https://www.dalgazette.com/wp-content/uploads/2024/03/rally.jpg?w=800">
        "#;
        assert_eq!(
            extract_image_url(html, BASE, HOST).as_deref(),
            Some("https://www.dalgazette.com/wp-content/uploads/2024/03/rally.jpg?w=800")
        );
    }

    #[test]
    fn off_site_candidate_is_skipped_for_next_source() {
        let html = r#"
            <meta property="og:image" content="https://tracker.example.net/pixel.jpg">
            <img src="/wp-content/uploads/real.png">
        "#;
        assert_eq!(
            extract_image_url(html, BASE, HOST).as_deref(),
            Some("https://dalgazette.com/wp-content/uploads/real.png")
        );
    }

    #[test]
    fn non_image_extension_is_rejected() {
        let html = r#"<meta property="og:image" content="https://dalgazette.com/share.gif">"#;
        assert_eq!(extract_image_url(html, BASE, HOST), None);
    }

    #[test]
    fn extract_attr_reads_either_quote_style() {
        let tag = r#"<meta name='twitter:image' content="https://dalgazette.com/a.png">"#;
        assert_eq!(extract_attr(tag, "name").as_deref(), Some("twitter:image"));
        assert_eq!(
            extract_attr(tag, "content").as_deref(),
            Some("https://dalgazette.com/a.png")
        );
        assert_eq!(extract_attr(tag, "alt"), None);
    }

    #[test]
    fn data_src_does_not_shadow_src() {
        let html = r#"<img data-src="/lazy.svg" src="/wp-content/uploads/a.jpg">"#;
        assert_eq!(
            extract_image_url(html, BASE, HOST).as_deref(),
            Some("https://dalgazette.com/wp-content/uploads/a.jpg")
        );
    }
}
