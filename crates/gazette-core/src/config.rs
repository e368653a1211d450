use crate::app_config::{AppConfig, Environment, SourceKind};
use crate::articles::DEFAULT_AUTHOR;
use crate::ConfigError;

/// Browser-like user agent sent when no override is configured. The
/// newspaper's CDN rejects obviously automated clients.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default; only malformed values are rejected.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("GAZETTE_ENV", "development"));

    let bind_addr = or_default("GAZETTE_BIND_ADDR", "0.0.0.0:3001")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("GAZETTE_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("GAZETTE_LOG_LEVEL", "info");

    let site_base_url = or_default("GAZETTE_SITE_URL", "https://dalgazette.com")
        .trim_end_matches('/')
        .to_string();
    if !(site_base_url.starts_with("http://") || site_base_url.starts_with("https://")) {
        return Err(invalid(
            "GAZETTE_SITE_URL",
            format!("\"{site_base_url}\" must start with http:// or https://"),
        ));
    }

    let feed_path = or_default("GAZETTE_FEED_PATH", "/feed/");

    let source = or_default("GAZETTE_SOURCE", "rss")
        .parse::<SourceKind>()
        .map_err(|reason| invalid("GAZETTE_SOURCE", reason))?;

    let request_timeout_secs = or_default("GAZETTE_REQUEST_TIMEOUT_SECS", "10")
        .parse::<u64>()
        .map_err(|e| invalid("GAZETTE_REQUEST_TIMEOUT_SECS", e.to_string()))?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "GAZETTE_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let user_agent = or_default("GAZETTE_USER_AGENT", DEFAULT_USER_AGENT);
    let staff_author = or_default("GAZETTE_STAFF_AUTHOR", DEFAULT_AUTHOR);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        site_base_url,
        feed_path,
        source,
        request_timeout_secs,
        user_agent,
        staff_author,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
