//! WatchSoMuch Provider Core Library
//!
//! This crate provides the scraping and link resolution functionality for
//! the watchsomuch.to streaming catalog, exposed through the [`Provider`]
//! contract consumed by media-browsing hosts.
//!
//! # Features
//! - Browse home-page sections and search the catalog
//! - Load movie and series details including episode lists
//! - Resolve playable links from download anchors, embedded players and
//!   inline scripts, streamed to a [`LinkSink`] as they are found
//! - Site layout kept as data in [`SiteConfig`]
//! - Rate-limited HTTP client to avoid server overload

pub mod client;
pub mod config;
pub mod error;
pub mod extractor;
pub mod parser;
pub mod provider;
pub mod scraper;
pub mod sink;
pub mod types;
pub mod url;

// Re-export main types for convenience
pub use client::{ClientConfig, RateLimiter, WsmClient};
pub use config::{SelectorChain, SiteConfig};
pub use error::{Result, WsmError};
pub use extractor::{EmbedExtractor, ExtractorRegistry};
pub use provider::{Provider, ProviderInfo};
pub use scraper::WsmScraper;
pub use sink::{CallbackSink, CollectedLinks, LinkSink};
pub use types::{
    DetailContent, DetailRecord, EpisodeEntry, HomePage, LinkEvent, ListingEntry, MainPageRequest,
    MediaKind, MediaLink, Quality, SubtitleLink,
};
