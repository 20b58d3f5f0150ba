//! Delegated extractors for embedded players
//!
//! Third-party player frames are resolved by [`EmbedExtractor`]
//! implementations supplied by the host. The provider only hands them the
//! frame URL, the referer and the sink; what they emit is passed through
//! unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::error::{Result, WsmError};
use crate::sink::LinkSink;

/// Resolver for one family of embedded players
#[async_trait]
pub trait EmbedExtractor: Send + Sync {
    /// Name used in logs and as link display name
    fn name(&self) -> &str;

    /// Whether this extractor handles the given frame URL
    fn suitable(&self, url: &Url) -> bool;

    /// Resolve a frame, emitting zero or more links to `sink`.
    async fn extract(&self, embed_url: &str, referer: &str, sink: &mut dyn LinkSink) -> Result<()>;
}

/// Ordered set of extractors; the first suitable one wins.
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    extractors: Vec<Arc<dyn EmbedExtractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an extractor with the lowest priority so far
    pub fn register(&mut self, extractor: Arc<dyn EmbedExtractor>) {
        self.extractors.push(extractor);
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// First extractor accepting `embed_url`
    pub fn find(&self, embed_url: &str) -> Option<Arc<dyn EmbedExtractor>> {
        let url = Url::parse(embed_url).ok()?;
        self.extractors
            .iter()
            .find(|extractor| extractor.suitable(&url))
            .cloned()
    }

    /// Resolve one frame with the first suitable extractor.
    ///
    /// # Errors
    /// - `WsmError::NoExtractor` - no extractor accepts the URL
    /// - any error returned by the extractor itself
    pub async fn resolve(&self, embed_url: &str, referer: &str, sink: &mut dyn LinkSink) -> Result<()> {
        let extractor = self
            .find(embed_url)
            .ok_or_else(|| WsmError::NoExtractor(embed_url.to_string()))?;

        tracing::debug!("Resolving {} with {}", embed_url, extractor.name());
        extractor.extract(embed_url, referer, sink).await
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.extractors.iter().map(|e| e.name()))
            .finish()
    }
}
