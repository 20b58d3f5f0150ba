//! URL helpers for WatchSoMuch pages
//!
//! Every href or src captured from a page is rewritten to an absolute URL
//! against the site base before it leaves the crate.

use url::Url;

use crate::error::{Result, WsmError};

/// Parse the configured site base URL.
///
/// # Errors
/// Returns `InvalidUrl` if `base` is not an absolute http(s) URL.
pub fn parse_base_url(base: &str) -> Result<Url> {
    let url = Url::parse(base.trim()).map_err(|_| WsmError::InvalidUrl(base.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(WsmError::InvalidUrl(base.to_string()));
    }
    Ok(url)
}

/// Resolve a possibly relative URL against the site base.
///
/// Relative paths are appended to the base, keeping any path the base
/// carries. Scheme-relative URLs take the base scheme; absolute URLs pass
/// through unchanged. Empty input yields `None`.
///
/// # Examples
/// ```
/// use url::Url;
/// use wsm_core::url::absolute_url;
///
/// let base = Url::parse("https://watchsomuch.to").unwrap();
/// assert_eq!(
///     absolute_url(&base, "/Movies/foo").as_deref(),
///     Some("https://watchsomuch.to/Movies/foo")
/// );
/// assert_eq!(absolute_url(&base, "  "), None);
/// ```
pub fn absolute_url(base: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("//") {
        return Some(format!("{}:{}", base.scheme(), raw));
    }
    if Url::parse(raw).is_ok() {
        return Some(raw.to_string());
    }

    Some(format!("{}/{}", base_prefix(base), raw.trim_start_matches('/')))
}

/// Base URL without its trailing slash
fn base_prefix(base: &Url) -> &str {
    base.as_str().trim_end_matches('/')
}

/// Whether `raw` already is an absolute http(s) URL.
pub fn is_absolute_http(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

/// Search page URL for a query.
///
/// # Examples
/// ```
/// use url::Url;
/// use wsm_core::url::build_search_url;
///
/// let base = Url::parse("https://watchsomuch.to").unwrap();
/// assert_eq!(build_search_url(&base, "the office"), "https://watchsomuch.to/search/the%20office");
/// ```
pub fn build_search_url(base: &Url, query: &str) -> String {
    let encoded = urlencoding::encode(query.trim());
    format!("{}/search/{}", base_prefix(base), encoded)
}
