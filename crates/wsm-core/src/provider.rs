//! Provider contract consumed by host applications

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sink::LinkSink;
use crate::types::{DetailRecord, HomePage, ListingEntry, MainPageRequest, MediaKind};

/// Static description of a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub base_url: String,
    pub lang: String,
    pub has_main_page: bool,
    pub has_download_support: bool,
    pub supported_kinds: Vec<MediaKind>,
}

/// Entry points a host calls on a content provider.
///
/// The entry points share no mutable state and may be called concurrently.
#[async_trait]
pub trait Provider: Send + Sync {
    fn info(&self) -> ProviderInfo;

    /// Browse sections offered on the home page, indexable by position
    fn main_page_requests(&self) -> Vec<MainPageRequest>;

    /// One page of the home-page section at `index`
    async fn main_page(&self, index: usize, page: u32) -> Result<HomePage>;

    async fn search(&self, query: &str) -> Result<Vec<ListingEntry>>;

    /// Full metadata of a detail page; `None` when the page has no title
    async fn load(&self, url: &str) -> Result<Option<DetailRecord>>;

    /// Emit every playable link of a detail page to `sink`.
    ///
    /// Returns `true` once all discovery passes completed, including when
    /// nothing was found.
    async fn load_links(&self, url: &str, sink: &mut dyn LinkSink) -> Result<bool>;
}
