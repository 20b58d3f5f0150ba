//! Main WatchSoMuch provider API
//!
//! This module combines the HTTP client, the site configuration and the
//! parsers into [`WsmScraper`], the implementation of [`Provider`] for
//! watchsomuch.to.

use std::collections::HashSet;

use async_trait::async_trait;
use url::Url;

use crate::client::WsmClient;
use crate::config::SiteConfig;
use crate::error::{Result, WsmError};
use crate::extractor::ExtractorRegistry;
use crate::parser::{discover_links, parse_detail, parse_listing};
use crate::provider::{Provider, ProviderInfo};
use crate::sink::LinkSink;
use crate::types::{DetailRecord, HomePage, ListingEntry, MainPageRequest, MediaKind};
use crate::url::{absolute_url, build_search_url, parse_base_url};

/// WatchSoMuch provider
///
/// # Example
/// ```no_run
/// use wsm_core::{Provider, WsmScraper};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = WsmScraper::new()?;
///
///     let results = scraper.search("the office").await?;
///     println!("Found {} results", results.len());
///
///     Ok(())
/// }
/// ```
pub struct WsmScraper {
    client: WsmClient,
    config: SiteConfig,
    base: Url,
    extractors: ExtractorRegistry,
}

impl WsmScraper {
    /// Create a scraper for the production site with default settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(SiteConfig::default(), WsmClient::new()?)
    }

    /// Create a scraper with a custom site configuration and client.
    ///
    /// # Errors
    /// Returns `WsmError::InvalidUrl` if the configured base URL is invalid.
    pub fn with_config(config: SiteConfig, client: WsmClient) -> Result<Self> {
        let base = parse_base_url(&config.base_url)?;
        Ok(Self {
            client,
            config,
            base,
            extractors: ExtractorRegistry::new(),
        })
    }

    /// Use `extractors` for embedded players.
    pub fn with_extractors(mut self, extractors: ExtractorRegistry) -> Self {
        self.extractors = extractors;
        self
    }

    /// Registered embed extractors
    pub fn extractors_mut(&mut self) -> &mut ExtractorRegistry {
        &mut self.extractors
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    fn resolve_url(&self, url: &str) -> Result<String> {
        absolute_url(&self.base, url).ok_or_else(|| WsmError::InvalidUrl(url.to_string()))
    }
}

#[async_trait]
impl Provider for WsmScraper {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: self.config.name.clone(),
            base_url: self.config.base_url.clone(),
            lang: self.config.lang.clone(),
            has_main_page: !self.config.main_pages.is_empty(),
            has_download_support: true,
            supported_kinds: vec![MediaKind::Movie, MediaKind::Series],
        }
    }

    fn main_page_requests(&self) -> Vec<MainPageRequest> {
        self.config
            .main_pages
            .iter()
            .filter_map(|section| {
                let url = absolute_url(&self.base, &section.path)?;
                Some(MainPageRequest::new(section.name.clone(), url))
            })
            .collect()
    }

    async fn main_page(&self, index: usize, page: u32) -> Result<HomePage> {
        let request = self
            .main_page_requests()
            .into_iter()
            .nth(index)
            .ok_or_else(|| WsmError::InvalidRequest(format!("no main page section {}", index)))?;

        let html = self.client.fetch(&request.page_url(page)).await?;
        let items = parse_listing(&html, &self.config.listing.main_page_items, &self.config, &self.base);

        Ok(HomePage {
            name: request.name,
            has_next_page: !items.is_empty(),
            items,
            current_page: page.max(1),
        })
    }

    async fn search(&self, query: &str) -> Result<Vec<ListingEntry>> {
        if query.trim().is_empty() {
            return Err(WsmError::InvalidRequest("search query cannot be empty".to_string()));
        }

        let html = self.client.fetch(&build_search_url(&self.base, query)).await?;
        Ok(parse_listing(&html, &self.config.listing.search_items, &self.config, &self.base))
    }

    async fn load(&self, url: &str) -> Result<Option<DetailRecord>> {
        let url = self.resolve_url(url)?;
        let html = self.client.fetch(&url).await?;
        Ok(parse_detail(&html, &url, &self.config, &self.base))
    }

    async fn load_links(&self, url: &str, sink: &mut dyn LinkSink) -> Result<bool> {
        let page_url = self.resolve_url(url)?;
        let html = self.client.fetch(&page_url).await?;
        let discovered = discover_links(&html, &page_url, &self.config, &self.base);

        // Repeated URLs on the page itself are emitted once
        let mut seen = HashSet::new();
        for link in discovered.direct.into_iter().chain(discovered.scripted) {
            if seen.insert(link.url.clone()) {
                sink.on_media_link(link);
            }
        }

        for embed in &discovered.embeds {
            if let Err(e) = self.extractors.resolve(embed, &page_url, sink).await {
                tracing::warn!("Embed {} on {} failed: {}", embed, page_url, e);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::CollectedLinks;

    #[test]
    fn test_scraper_creation() {
        assert!(WsmScraper::new().is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = SiteConfig::with_base_url("not a url");
        let result = WsmScraper::with_config(config, WsmClient::new().unwrap());
        assert!(matches!(result, Err(WsmError::InvalidUrl(_))));
    }

    #[test]
    fn test_info() {
        let info = WsmScraper::new().unwrap().info();
        assert_eq!(info.name, "WatchSoMuch");
        assert_eq!(info.lang, "en");
        assert!(info.has_main_page);
        assert!(info.has_download_support);
        assert_eq!(info.supported_kinds, vec![MediaKind::Movie, MediaKind::Series]);
    }

    #[test]
    fn test_main_page_requests() {
        let requests = WsmScraper::new().unwrap().main_page_requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[0].name, "Popular Movies");
        assert_eq!(requests[0].url, "https://watchsomuch.to/?browse=popular");
        assert_eq!(requests[3].url, "https://watchsomuch.to/?browse=documentaries");
    }

    #[tokio::test]
    async fn test_search_empty_query() {
        let scraper = WsmScraper::new().unwrap();
        match scraper.search("   ").await {
            Err(WsmError::InvalidRequest(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidRequest error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_main_page_unknown_section() {
        let scraper = WsmScraper::new().unwrap();
        let result = scraper.main_page(99, 1).await;
        assert!(matches!(result, Err(WsmError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_load_links_invalid_url() {
        let scraper = WsmScraper::new().unwrap();
        let mut sink = CollectedLinks::new();
        let result = scraper.load_links("", &mut sink).await;
        assert!(matches!(result, Err(WsmError::InvalidUrl(_))));
        assert!(sink.events.is_empty());
    }
}
