//! Episodes parser for WatchSoMuch series pages
//!
//! Parses episode elements of a series detail page into [`EpisodeEntry`]
//! records.

use scraper::ElementRef;
use url::Url;

use crate::config::{DetailSelectors, SiteConfig};
use crate::types::EpisodeEntry;
use crate::url::absolute_url;

/// Season and episode number used when the page gives none
const DEFAULT_NUMBER: u32 = 1;

/// Parse all episodes below `scope`.
///
/// Episodes without a link are skipped silently; the remaining ones are
/// returned in page order.
pub fn parse_episodes(scope: ElementRef<'_>, config: &SiteConfig, base: &Url) -> Vec<EpisodeEntry> {
    let selectors = &config.detail;
    let episodes: Vec<EpisodeEntry> = selectors
        .episodes
        .select_all(scope)
        .into_iter()
        .filter_map(|element| parse_episode(element, selectors, base))
        .collect();

    tracing::debug!("Parsed {} episodes", episodes.len());
    episodes
}

/// Parse a single episode element.
///
/// Returns `None` only when the element has no anchor href. Season and
/// episode numbers come from the data attributes, then from the episode
/// number text, and default to 1.
pub fn parse_episode(
    element: ElementRef<'_>,
    selectors: &DetailSelectors,
    base: &Url,
) -> Option<EpisodeEntry> {
    let href = selectors.episode_link.first(element)?.value().attr("href")?;
    let url = absolute_url(base, href)?;

    let name = selectors.episode_name.first_text(element);

    let season = parse_number(element.value().attr(&selectors.season_attr)).unwrap_or(DEFAULT_NUMBER);

    let episode_number = parse_number(element.value().attr(&selectors.episode_attr))
        .or_else(|| {
            selectors
                .episode_number
                .first_text(element)
                .and_then(|text| parse_number(Some(&text)))
        })
        .unwrap_or(DEFAULT_NUMBER);

    Some(EpisodeEntry {
        url,
        name,
        season,
        episode_number,
    })
}

fn parse_number(text: Option<&str>) -> Option<u32> {
    text?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn base() -> Url {
        Url::parse("https://watchsomuch.to").unwrap()
    }

    fn parse(html: &str) -> Vec<EpisodeEntry> {
        let document = Html::parse_document(html);
        parse_episodes(document.root_element(), &SiteConfig::default(), &base())
    }

    #[test]
    fn test_episode_from_data_attributes() {
        let html = r#"
            <div class="episode-item" data-season="2" data-episode="5">
                <a href="/Series/foo/s2e5">Watch</a>
                <span class="episode-title">The Fifth</span>
            </div>"#;

        assert_eq!(
            parse(html),
            vec![EpisodeEntry {
                url: "https://watchsomuch.to/Series/foo/s2e5".to_string(),
                name: Some("The Fifth".to_string()),
                season: 2,
                episode_number: 5,
            }]
        );
    }

    #[test]
    fn test_episode_number_from_text() {
        let html = r#"
            <li class="episode" data-season="3">
                <a href="/Series/foo/e7"></a><span class="episode-number"> 7 </span>
            </li>"#;

        let episodes = parse(html);
        assert_eq!(episodes[0].season, 3);
        assert_eq!(episodes[0].episode_number, 7);
        assert_eq!(episodes[0].name, None);
    }

    #[test]
    fn test_episode_defaults_to_one() {
        let html = r#"<div class="episode"><a href="/Series/foo/x"></a></div>"#;

        let episodes = parse(html);
        assert_eq!(episodes[0].season, 1);
        assert_eq!(episodes[0].episode_number, 1);
    }

    #[test]
    fn test_unparsable_numbers_default() {
        let html = r#"
            <div class="episode" data-season="S1" data-episode="">
                <a href="/Series/foo/x"></a><span class="episode-number">Episode</span>
            </div>"#;

        let episodes = parse(html);
        assert_eq!(episodes[0].season, 1);
        assert_eq!(episodes[0].episode_number, 1);
    }

    #[test]
    fn test_episode_without_link_is_skipped() {
        let html = r#"
            <div class="episode-item"><span class="title">Coming soon</span></div>
            <div class="episode-item"><a href="/Series/foo/2">Two</a></div>"#;

        let episodes = parse(html);
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].url, "https://watchsomuch.to/Series/foo/2");
    }

    #[test]
    fn test_parse_episodes_empty() {
        assert!(parse("<html><body></body></html>").is_empty());
    }
}
