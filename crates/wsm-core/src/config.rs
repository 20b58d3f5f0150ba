//! Site configuration for the WatchSoMuch provider
//!
//! Page layout knowledge lives here as data: every extracted field owns an
//! ordered [`SelectorChain`], so a layout change on the site is a
//! configuration change rather than a code change. `SiteConfig::default()`
//! describes the production site; JSON overrides can be loaded with
//! [`SiteConfig::from_json`].

use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Production site base URL
pub const DEFAULT_BASE_URL: &str = "https://watchsomuch.to";

/// Provider display name
pub const DEFAULT_NAME: &str = "WatchSoMuch";

/// Ordered list of CSS selectors tried for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectorChain(Vec<String>);

impl SelectorChain {
    pub fn new(selectors: &[&str]) -> Self {
        Self(selectors.iter().map(|s| s.to_string()).collect())
    }

    /// Raw selector strings in priority order
    pub fn selectors(&self) -> &[String] {
        &self.0
    }

    fn compiled(&self) -> impl Iterator<Item = Selector> + '_ {
        self.0.iter().filter_map(|raw| match Selector::parse(raw) {
            Ok(selector) => Some(selector),
            Err(e) => {
                tracing::warn!("Skipping invalid selector {:?}: {:?}", raw, e);
                None
            }
        })
    }

    /// Every valid selector as one group, matching in document order.
    fn grouped(&self) -> Option<Selector> {
        let valid: Vec<&str> = self
            .0
            .iter()
            .map(String::as_str)
            .filter(|raw| match Selector::parse(raw) {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!("Skipping invalid selector {:?}: {:?}", raw, e);
                    false
                }
            })
            .collect();
        if valid.is_empty() {
            return None;
        }

        let group = valid.join(", ");
        // Bound to a local so the parse result is dropped before `group`
        #[allow(clippy::let_and_return)]
        let selector = Selector::parse(&group).ok();
        selector
    }

    /// First element matched by the earliest selector that matches anything
    pub fn first<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.compiled().find_map(|selector| scope.select(&selector).next())
    }

    /// Text of the first match, trying selectors in order until one yields
    /// non-empty text.
    pub fn first_text(&self, scope: ElementRef<'_>) -> Option<String> {
        self.compiled().find_map(|selector| {
            let el = scope.select(&selector).next()?;
            non_empty(element_text(&el))
        })
    }

    /// Attribute of the first match, trying selectors in order until one
    /// yields a non-empty value.
    pub fn first_attr(&self, scope: ElementRef<'_>, attr: &str) -> Option<String> {
        self.compiled().find_map(|selector| {
            let el = scope.select(&selector).next()?;
            non_empty(el.value().attr(attr)?.trim().to_string())
        })
    }

    /// Every element matched by any selector, in document order
    pub fn select_all<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        match self.grouped() {
            Some(selector) => scope.select(&selector).collect(),
            None => Vec::new(),
        }
    }

    /// Non-empty texts of every match, in document order
    pub fn all_texts(&self, scope: ElementRef<'_>) -> Vec<String> {
        self.select_all(scope)
            .iter()
            .filter_map(|el| non_empty(element_text(el)))
            .collect()
    }
}

/// Whitespace-normalized text content of an element
pub fn element_text(el: &ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Browse section of the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainPageSection {
    /// Section label
    pub name: String,
    /// Listing path relative to the base URL
    pub path: String,
}

impl MainPageSection {
    fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
        }
    }
}

/// Selectors for listing and search pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingSelectors {
    /// Catalog items on browse pages
    pub main_page_items: SelectorChain,
    /// Catalog items on search pages
    pub search_items: SelectorChain,
    /// Anchor carrying the href and title attribute
    pub link: SelectorChain,
    /// Title text used when the anchor has no title attribute
    pub title_fallback: SelectorChain,
    pub poster: SelectorChain,
    /// Poster attributes, in priority order
    pub poster_attrs: Vec<String>,
    pub quality: SelectorChain,
    pub year: SelectorChain,
    /// Element whose non-empty text marks a series
    pub series_indicator: SelectorChain,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            main_page_items: SelectorChain::new(&["div.movie-item", "div.series-item", ".movie-box"]),
            search_items: SelectorChain::new(&["div.movie-item", "div.series-item", ".search-result"]),
            link: SelectorChain::new(&["a"]),
            title_fallback: SelectorChain::new(&[".title", "h3", "h2"]),
            poster: SelectorChain::new(&["img"]),
            poster_attrs: vec!["src".to_string(), "data-src".to_string()],
            quality: SelectorChain::new(&[".quality", ".video-quality"]),
            year: SelectorChain::new(&[".year"]),
            series_indicator: SelectorChain::new(&[".series-indicator"]),
        }
    }
}

/// Selectors for detail pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetailSelectors {
    pub title: SelectorChain,
    pub poster: SelectorChain,
    pub tags: SelectorChain,
    pub year: SelectorChain,
    pub description: SelectorChain,
    pub rating: SelectorChain,
    pub duration: SelectorChain,
    pub cast: SelectorChain,
    pub episodes: SelectorChain,
    /// Episode anchor inside an episode element
    pub episode_link: SelectorChain,
    pub episode_name: SelectorChain,
    pub episode_number: SelectorChain,
    pub season_attr: String,
    pub episode_attr: String,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            title: SelectorChain::new(&["h1", ".movie-title", ".title"]),
            poster: SelectorChain::new(&[".poster img", ".movie-poster img", "img"]),
            tags: SelectorChain::new(&[".genre a", ".genres a"]),
            year: SelectorChain::new(&[".year", ".release-year"]),
            description: SelectorChain::new(&[".description", ".synopsis", ".plot"]),
            rating: SelectorChain::new(&[".rating", ".imdb-rating"]),
            duration: SelectorChain::new(&[".duration", ".runtime"]),
            cast: SelectorChain::new(&[".cast a", ".actors a"]),
            episodes: SelectorChain::new(&[".episode-item", ".episode"]),
            episode_link: SelectorChain::new(&["a"]),
            episode_name: SelectorChain::new(&[".episode-title", ".title"]),
            episode_number: SelectorChain::new(&[".episode-number"]),
            season_attr: "data-season".to_string(),
            episode_attr: "data-episode".to_string(),
        }
    }
}

/// Selectors and patterns for playback link discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkSelectors {
    /// Anchors that may point at a media file
    pub direct: SelectorChain,
    /// File extensions a direct link must contain
    pub media_extensions: Vec<String>,
    /// Player frames handed to delegated extractors
    pub embeds: SelectorChain,
    pub scripts: SelectorChain,
    /// Pattern whose first group is a quoted media URL inside a script
    pub script_media_pattern: String,
}

impl Default for LinkSelectors {
    fn default() -> Self {
        Self {
            direct: SelectorChain::new(&["a[href*='download']", "a[href*='stream']", ".download-link"]),
            media_extensions: vec![".mp4".to_string(), ".mkv".to_string(), ".m3u8".to_string()],
            embeds: SelectorChain::new(&["iframe", "embed"]),
            scripts: SelectorChain::new(&["script"]),
            script_media_pattern: r#"["']([^"']*\.(?:mp4|mkv|m3u8|avi)[^"']*)["']"#.to_string(),
        }
    }
}

/// Read-only configuration shared by all provider entry points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub base_url: String,
    /// Display name, also used as the name of directly found links
    pub name: String,
    pub lang: String,
    pub main_pages: Vec<MainPageSection>,
    /// URL substrings that classify an entry as a series
    pub series_url_markers: Vec<String>,
    pub listing: ListingSelectors,
    pub detail: DetailSelectors,
    pub links: LinkSelectors,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            name: DEFAULT_NAME.to_string(),
            lang: "en".to_string(),
            main_pages: vec![
                MainPageSection::new("Popular Movies", "/?browse=popular"),
                MainPageSection::new("New Movies", "/?browse=new"),
                MainPageSection::new("Series", "/?browse=series"),
                MainPageSection::new("Documentaries", "/?browse=documentaries"),
            ],
            series_url_markers: vec!["/Series/".to_string(), "series".to_string()],
            listing: ListingSelectors::default(),
            detail: DetailSelectors::default(),
            links: LinkSelectors::default(),
        }
    }
}

impl SiteConfig {
    /// Default configuration pointed at another base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load a configuration from JSON; omitted fields keep their defaults.
    ///
    /// # Errors
    /// Returns `WsmError::Config` on malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether a URL looks like a series page
    pub fn is_series_url(&self, url: &str) -> bool {
        self.series_url_markers
            .iter()
            .any(|marker| url.contains(marker.as_str()))
    }
}
