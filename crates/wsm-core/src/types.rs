//! Data types for the WatchSoMuch provider
//!
//! Every record is an immutable value handed to the caller once. All types
//! implement Serialize and Deserialize for JSON compatibility with Tauri.

use serde::{Deserialize, Serialize};

/// Kind of catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Movie,
    Series,
}

/// Coarse resolution class, ordered by resolution.
///
/// The discriminant is the stable integer tag exposed to hosts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Quality {
    #[default]
    Unknown = -1,
    P360 = 360,
    P480 = 480,
    P720 = 720,
    P1080 = 1080,
    P1440 = 1440,
    P2160 = 2160,
}

/// Recognised quality markers, searched in this order.
const QUALITY_MARKERS: [(&str, Quality); 7] = [
    ("1080p", Quality::P1080),
    ("720p", Quality::P720),
    ("480p", Quality::P480),
    ("4k", Quality::P2160),
    ("2160p", Quality::P2160),
    ("1440p", Quality::P1440),
    ("360p", Quality::P360),
];

impl Quality {
    /// Classify free text such as `"1080p"`, `"4K"` or `"Download 720p"`.
    ///
    /// Matching is case-insensitive and substring based, so listing labels
    /// and link captions go through the same rule. Unrecognised text maps to
    /// `Unknown`.
    ///
    /// # Examples
    /// ```
    /// use wsm_core::Quality;
    ///
    /// assert_eq!(Quality::from_text("Download 720p"), Quality::P720);
    /// assert_eq!(Quality::from_text("4K"), Quality::P2160);
    /// assert_eq!(Quality::from_text("HD"), Quality::Unknown);
    /// ```
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        QUALITY_MARKERS
            .iter()
            .find(|(marker, _)| lower.contains(marker))
            .map(|(_, quality)| *quality)
            .unwrap_or(Quality::Unknown)
    }

    /// Stable integer tag of this quality
    pub fn value(self) -> i32 {
        self as i32
    }
}

/// Normalized catalog item from a listing or search page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Display title
    pub title: String,
    /// Absolute URL of the detail page
    pub url: String,
    /// Absolute poster URL
    pub poster_url: Option<String>,
    /// Quality badge shown on the listing
    pub quality: Quality,
    /// Release year
    pub year: Option<i32>,
    /// Movie or series
    pub kind: MediaKind,
}

/// Episode of a series detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeEntry {
    /// Absolute URL of the episode page
    pub url: String,
    /// Episode title, if the page shows one
    pub name: Option<String>,
    /// Season number (1 when unknown)
    pub season: u32,
    /// Episode number within the season (1 when unknown)
    pub episode_number: u32,
}

/// Kind-specific part of a detail record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DetailContent {
    Movie {
        /// Runtime text as shown on the page
        duration: Option<String>,
    },
    Series {
        episodes: Vec<EpisodeEntry>,
    },
}

/// Full metadata of a detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub title: String,
    /// URL the record was loaded from
    pub url: String,
    pub poster_url: Option<String>,
    /// Genre tags in page order
    pub tags: Vec<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    /// Rating on a 0..=10000 scale (score out of 10 times 1000)
    pub rating: Option<u32>,
    /// Actor names in page order
    pub cast: Vec<String>,
    #[serde(flatten)]
    pub content: DetailContent,
}

impl DetailRecord {
    /// Media kind implied by the content variant
    pub fn kind(&self) -> MediaKind {
        match self.content {
            DetailContent::Movie { .. } => MediaKind::Movie,
            DetailContent::Series { .. } => MediaKind::Series,
        }
    }

    /// Episodes of a series, `None` for movies
    pub fn episodes(&self) -> Option<&[EpisodeEntry]> {
        match &self.content {
            DetailContent::Series { episodes } => Some(episodes),
            DetailContent::Movie { .. } => None,
        }
    }
}

/// Playable media link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaLink {
    /// Name shown next to the link (provider or extractor name)
    pub display_name: String,
    /// Absolute media URL
    pub url: String,
    /// Page to send as Referer when playing
    pub referer: String,
    pub quality: Quality,
    /// Adaptive playlist (`.m3u8`) rather than a progressive file
    pub is_segmented: bool,
}

/// Subtitle track reported by a delegated extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleLink {
    /// Language label as reported by the extractor
    pub lang: String,
    /// Absolute subtitle URL
    pub url: String,
}

/// One emission of the link resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LinkEvent {
    Subtitle(SubtitleLink),
    MediaLink(MediaLink),
}

/// Named browse section of the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainPageRequest {
    /// Section label
    pub name: String,
    /// Absolute listing URL (already carries a query string)
    pub url: String,
}

impl MainPageRequest {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// URL of the given 1-based page
    ///
    /// # Examples
    /// ```
    /// use wsm_core::MainPageRequest;
    ///
    /// let req = MainPageRequest::new("Series", "https://watchsomuch.to/?browse=series");
    /// assert_eq!(req.page_url(1), "https://watchsomuch.to/?browse=series");
    /// assert_eq!(req.page_url(3), "https://watchsomuch.to/?browse=series&page=3");
    /// ```
    pub fn page_url(&self, page: u32) -> String {
        if page > 1 {
            format!("{}&page={}", self.url, page)
        } else {
            self.url.clone()
        }
    }
}

/// One page of a home-page section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomePage {
    /// Section label
    pub name: String,
    pub items: Vec<ListingEntry>,
    /// Current page number (1-based)
    pub current_page: u32,
    /// Whether requesting the next page may yield more items
    pub has_next_page: bool,
}
