//! Playback link discovery on WatchSoMuch detail pages
//!
//! Three independent passes run over the same document:
//! - direct anchors pointing at media files,
//! - embedded player frames, which are handed to delegated extractors,
//! - media URLs quoted inside inline scripts.

use scraper::{ElementRef, Html};
use url::Url;

use crate::config::SiteConfig;
use crate::types::{MediaLink, Quality};
use crate::url::{absolute_url, is_absolute_http};

/// Segmented (HLS) playlist marker
const SEGMENTED_MARKER: &str = ".m3u8";

/// Everything found on one detail page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveredLinks {
    /// Links from download/stream anchors
    pub direct: Vec<MediaLink>,
    /// Absolute player frame URLs, in page order
    pub embeds: Vec<String>,
    /// Links mined from inline scripts
    pub scripted: Vec<MediaLink>,
}

impl DiscoveredLinks {
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.embeds.is_empty() && self.scripted.is_empty()
    }
}

/// Run all discovery passes over a detail page.
///
/// # Arguments
/// * `html` - Raw HTML content of the detail page
/// * `page_url` - URL of the page, used as referer of every link
/// * `config` - Site configuration
/// * `base` - Base URL relative links are resolved against
pub fn discover_links(html: &str, page_url: &str, config: &SiteConfig, base: &Url) -> DiscoveredLinks {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let discovered = DiscoveredLinks {
        direct: find_direct_links(root, page_url, config, base),
        embeds: find_embeds(root, config, base),
        scripted: find_script_links(root, page_url, config),
    };

    tracing::debug!(
        "Discovered {} direct, {} embedded, {} scripted links on {}",
        discovered.direct.len(),
        discovered.embeds.len(),
        discovered.scripted.len(),
        page_url
    );
    discovered
}

/// Download/stream anchors whose href names a known media file.
pub fn find_direct_links(
    root: ElementRef<'_>,
    page_url: &str,
    config: &SiteConfig,
    base: &Url,
) -> Vec<MediaLink> {
    let selectors = &config.links;

    selectors
        .direct
        .select_all(root)
        .into_iter()
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.trim();
            if !selectors
                .media_extensions
                .iter()
                .any(|ext| href.contains(ext.as_str()))
            {
                return None;
            }

            let url = absolute_url(base, href)?;
            let caption = anchor.text().collect::<String>();

            Some(MediaLink {
                display_name: config.name.clone(),
                url,
                referer: page_url.to_string(),
                quality: Quality::from_text(&caption),
                is_segmented: href.contains(SEGMENTED_MARKER),
            })
        })
        .collect()
}

/// Absolute source URLs of every player frame.
pub fn find_embeds(root: ElementRef<'_>, config: &SiteConfig, base: &Url) -> Vec<String> {
    config
        .links
        .embeds
        .select_all(root)
        .into_iter()
        .filter_map(|frame| absolute_url(base, frame.value().attr("src")?))
        .collect()
}

/// Absolute media URLs quoted in inline scripts.
///
/// Relative or malformed matches are discarded.
pub fn find_script_links(root: ElementRef<'_>, page_url: &str, config: &SiteConfig) -> Vec<MediaLink> {
    let re = match regex_lite::Regex::new(&config.links.script_media_pattern) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!("Invalid script media pattern: {}", e);
            return Vec::new();
        }
    };

    let mut links = Vec::new();
    for script in config.links.scripts.select_all(root) {
        let body = script.text().collect::<String>();

        for caps in re.captures_iter(&body) {
            let Some(matched) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if !is_absolute_http(matched) {
                continue;
            }

            links.push(MediaLink {
                display_name: config.name.clone(),
                url: matched.to_string(),
                referer: page_url.to_string(),
                quality: Quality::Unknown,
                is_segmented: matched.contains(SEGMENTED_MARKER),
            });
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://watchsomuch.to/Movies/foo";

    fn discover(html: &str) -> DiscoveredLinks {
        let base = Url::parse("https://watchsomuch.to").unwrap();
        discover_links(html, PAGE_URL, &SiteConfig::default(), &base)
    }

    #[test]
    fn test_direct_links_with_quality() {
        let html = r#"
            <a href="/download/foo.720.mp4">Download 720p</a>
            <a href="https://cdn.example.com/stream/foo/master.m3u8">Stream 1080p</a>
            <a class="download-link" href="/files/foo.mkv">Get it</a>
            <a href="/download/foo.zip">Download 4K</a>
            <a href="/about">About</a>"#;

        let links = discover(html).direct;
        assert_eq!(links.len(), 3);

        assert_eq!(links[0].url, "https://watchsomuch.to/download/foo.720.mp4");
        assert_eq!(links[0].quality, Quality::P720);
        assert!(!links[0].is_segmented);
        assert_eq!(links[0].referer, PAGE_URL);
        assert_eq!(links[0].display_name, "WatchSoMuch");

        assert_eq!(links[1].quality, Quality::P1080);
        assert!(links[1].is_segmented);

        assert_eq!(links[2].url, "https://watchsomuch.to/files/foo.mkv");
        assert_eq!(links[2].quality, Quality::Unknown);
    }

    #[test]
    fn test_embeds_are_absolute() {
        let html = r#"
            <iframe src="//player.example.com/e/abc"></iframe>
            <embed src="/embed/xyz">
            <iframe></iframe>"#;

        assert_eq!(
            discover(html).embeds,
            vec![
                "https://player.example.com/e/abc".to_string(),
                "https://watchsomuch.to/embed/xyz".to_string(),
            ]
        );
    }

    #[test]
    fn test_script_mining_keeps_absolute_only() {
        let html = r#"
            <script>
                var x = "https://cdn.example.com/v/a.m3u8";
                var y = "/relative/b.mp4";
            </script>"#;

        let scripted = discover(html).scripted;
        assert_eq!(
            scripted,
            vec![MediaLink {
                display_name: "WatchSoMuch".to_string(),
                url: "https://cdn.example.com/v/a.m3u8".to_string(),
                referer: PAGE_URL.to_string(),
                quality: Quality::Unknown,
                is_segmented: true,
            }]
        );
    }

    #[test]
    fn test_script_mining_single_quotes_and_avi() {
        let html = r#"<script>player.setup({file:'http://media.example.org/a.avi?token=1'});</script>"#;

        let scripted = discover(html).scripted;
        assert_eq!(scripted.len(), 1);
        assert_eq!(scripted[0].url, "http://media.example.org/a.avi?token=1");
        assert!(!scripted[0].is_segmented);
    }

    #[test]
    fn test_empty_page_discovers_nothing() {
        assert!(discover("<html><body><p>Nothing here</p></body></html>").is_empty());
    }
}
