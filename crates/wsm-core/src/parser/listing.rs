//! Listing parser for WatchSoMuch browse and search pages
//!
//! Turns catalog items into normalized [`ListingEntry`] records.

use scraper::{ElementRef, Html};
use url::Url;

use crate::config::{SelectorChain, SiteConfig};
use crate::types::{ListingEntry, MediaKind, Quality};
use crate::url::absolute_url;

use super::parse_year;

/// Parse every catalog item of a listing page.
///
/// Items without a title or link are skipped; the rest of the page is
/// still returned.
///
/// # Arguments
/// * `html` - Raw HTML content of the listing page
/// * `items` - Selectors of the catalog item elements
/// * `config` - Site configuration
/// * `base` - Base URL relative links are resolved against
pub fn parse_listing(
    html: &str,
    items: &SelectorChain,
    config: &SiteConfig,
    base: &Url,
) -> Vec<ListingEntry> {
    let document = Html::parse_document(html);

    let entries: Vec<ListingEntry> = items
        .select_all(document.root_element())
        .into_iter()
        .filter_map(|element| normalize_entry(element, config, base))
        .collect();

    tracing::debug!("Parsed {} listing entries", entries.len());
    entries
}

/// Normalize a single catalog item.
///
/// Returns `None` when the item has no title or no link href.
pub fn normalize_entry(
    element: ElementRef<'_>,
    config: &SiteConfig,
    base: &Url,
) -> Option<ListingEntry> {
    let selectors = &config.listing;
    let link = selectors.link.first(element);

    // Anchor title attribute first, then visible title text
    let title = link
        .and_then(|a| a.value().attr("title"))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| selectors.title_fallback.first_text(element))?;

    let href = link?.value().attr("href")?;
    let url = absolute_url(base, href)?;

    let poster_url = extract_poster(element, config)
        .and_then(|src| absolute_url(base, &src));

    let quality = selectors
        .quality
        .first_text(element)
        .map(|text| Quality::from_text(&text))
        .unwrap_or_default();

    let year = selectors
        .year
        .first_text(element)
        .and_then(|text| parse_year(&text));

    let kind = classify_entry(element, &url, config);

    Some(ListingEntry {
        title,
        url,
        poster_url,
        quality,
        year,
        kind,
    })
}

/// Poster source, trying each configured attribute of the first image.
fn extract_poster(element: ElementRef<'_>, config: &SiteConfig) -> Option<String> {
    let img = config.listing.poster.first(element)?;
    config
        .listing
        .poster_attrs
        .iter()
        .filter_map(|attr| img.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Any single series signal is enough.
fn classify_entry(element: ElementRef<'_>, url: &str, config: &SiteConfig) -> MediaKind {
    if config.is_series_url(url) || config.listing.series_indicator.first_text(element).is_some() {
        MediaKind::Series
    } else {
        MediaKind::Movie
    }
}
