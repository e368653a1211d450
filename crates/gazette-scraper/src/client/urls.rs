//! URL origin, host, and resolution helpers shared by the extractors.

/// Extracts the scheme+host origin from a URL.
///
/// Given `"https://dalgazette.com/news/some-story/"`, returns
/// `"https://dalgazette.com"`.
#[must_use]
pub fn site_origin(url: &str) -> String {
    reqwest::Url::parse(url).map_or_else(
        |e| {
            tracing::warn!(
                url,
                error = %e,
                "could not parse URL; falling back to string split for origin extraction"
            );
            url.trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

/// Lower-cased hostname with any leading `www.` removed.
#[must_use]
pub fn host_of(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_owned())
}

/// Drops the query string and fragment from a URL.
#[must_use]
pub fn strip_query(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Resolves a possibly relative reference against the site.
///
/// Scheme-relative references (`//host/path`) always become `https:`, and
/// root-relative paths are prefixed with `base_origin`. Anything else is
/// joined onto `base_origin` the way a browser would. Returns `None` for
/// fragments, `mailto:`/`javascript:` links, and unparseable input.
#[must_use]
pub fn absolutize_url(base_origin: &str, candidate: &str) -> Option<String> {
    let candidate = candidate.trim().replace("&amp;", "&");
    if candidate.is_empty() || candidate.starts_with('#') {
        return None;
    }
    let lower = candidate.to_ascii_lowercase();
    if lower.starts_with("mailto:") || lower.starts_with("javascript:") || lower.starts_with("data:")
    {
        return None;
    }
    if candidate.starts_with("//") {
        return Some(format!("https:{candidate}"));
    }
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(candidate);
    }
    if candidate.starts_with('/') {
        return Some(format!("{}{candidate}", base_origin.trim_end_matches('/')));
    }
    let base = reqwest::Url::parse(&format!("{}/", base_origin.trim_end_matches('/'))).ok()?;
    base.join(&candidate).ok().map(|u| u.to_string())
}
