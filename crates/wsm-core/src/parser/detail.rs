//! Detail page parser for WatchSoMuch
//!
//! Parses movie and series detail pages into a [`DetailRecord`]. The page
//! kind is decided from the URL; series pages carry an episode list and
//! movie pages a duration.

use std::sync::OnceLock;

use regex_lite::Regex;
use scraper::Html;
use url::Url;

use crate::config::SiteConfig;
use crate::types::{DetailContent, DetailRecord};
use crate::url::absolute_url;

use super::episodes::parse_episodes;
use super::parse_year;

/// Parse a detail page.
///
/// # Arguments
/// * `html` - Raw HTML content of the detail page
/// * `url` - URL the page was loaded from (used for kind detection)
/// * `config` - Site configuration
/// * `base` - Base URL relative links are resolved against
///
/// # Returns
/// * `Some(DetailRecord)` with the parsed metadata
/// * `None` if the page has no title
pub fn parse_detail(html: &str, url: &str, config: &SiteConfig, base: &Url) -> Option<DetailRecord> {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let selectors = &config.detail;

    let Some(title) = selectors.title.first_text(root) else {
        tracing::debug!("No title found on {}", url);
        return None;
    };

    let poster_url = selectors
        .poster
        .first_attr(root, "src")
        .and_then(|src| absolute_url(base, &src));

    let tags = selectors.tags.all_texts(root);
    let year = selectors.year.first_text(root).and_then(|t| parse_year(&t));
    let description = selectors.description.first_text(root);
    let rating = selectors.rating.first_text(root).and_then(|t| parse_rating(&t));
    let cast = selectors.cast.all_texts(root);

    let content = if config.is_series_url(url) {
        DetailContent::Series {
            episodes: parse_episodes(root, config, base),
        }
    } else {
        DetailContent::Movie {
            duration: selectors.duration.first_text(root),
        }
    };

    Some(DetailRecord {
        title,
        url: url.to_string(),
        poster_url,
        tags,
        year,
        description,
        rating,
        cast,
        content,
    })
}

/// Convert rating text to the 0..=10000 scale (score out of 10 times 1000).
///
/// The first number in the text is used. A trailing `%` marks a percentage;
/// otherwise the number must be a score out of 10.
///
/// # Examples
/// ```
/// use wsm_core::parser::parse_rating;
///
/// assert_eq!(parse_rating("7.5"), Some(7500));
/// assert_eq!(parse_rating("IMDb: 8.1/10"), Some(8100));
/// assert_eq!(parse_rating("85%"), Some(8500));
/// assert_eq!(parse_rating("N/A"), None);
/// ```
pub fn parse_rating(text: &str) -> Option<u32> {
    static RATING_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let re = RATING_RE
        .get_or_init(|| Regex::new(r"(\d{1,3}(?:[.,]\d+)?)\s*(%)?").ok())
        .as_ref()?;
    let caps = re.captures(text)?;
    let value: f64 = caps.get(1)?.as_str().replace(',', ".").parse().ok()?;

    let scaled = if caps.get(2).is_some() {
        if !(0.0..=100.0).contains(&value) {
            return None;
        }
        value * 100.0
    } else {
        if !(0.0..=10.0).contains(&value) {
            return None;
        }
        value * 1000.0
    };

    Some(scaled.round() as u32)
}
