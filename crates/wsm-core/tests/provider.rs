//! End-to-end provider tests against a mock site

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wsm_core::{
    CallbackSink, ClientConfig, CollectedLinks, DetailContent, EmbedExtractor, ExtractorRegistry,
    LinkSink, MediaKind, MediaLink, Provider, Quality, SiteConfig, SubtitleLink, WsmClient,
    WsmError, WsmScraper,
};

fn scraper_for(server: &MockServer) -> WsmScraper {
    let client = WsmClient::with_config(ClientConfig {
        requests_per_second: 100.0,
        ..ClientConfig::default()
    })
    .unwrap();
    WsmScraper::with_config(SiteConfig::with_base_url(server.uri()), client).unwrap()
}

async fn serve(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Emits one link and one subtitle for frames on its host
struct PlayerExtractor;

#[async_trait]
impl EmbedExtractor for PlayerExtractor {
    fn name(&self) -> &str {
        "GoodPlayer"
    }

    fn suitable(&self, url: &Url) -> bool {
        url.host_str() == Some("good.player")
    }

    async fn extract(&self, embed_url: &str, referer: &str, sink: &mut dyn LinkSink) -> wsm_core::Result<()> {
        sink.on_subtitle(SubtitleLink {
            lang: "English".to_string(),
            url: "https://good.player/subs/en.vtt".to_string(),
        });
        sink.on_media_link(MediaLink {
            display_name: self.name().to_string(),
            url: format!("{}/master.m3u8", embed_url),
            referer: referer.to_string(),
            quality: Quality::P1080,
            is_segmented: true,
        });
        Ok(())
    }
}

/// Always fails
struct BrokenExtractor;

#[async_trait]
impl EmbedExtractor for BrokenExtractor {
    fn name(&self) -> &str {
        "BrokenPlayer"
    }

    fn suitable(&self, url: &Url) -> bool {
        url.host_str() == Some("broken.player")
    }

    async fn extract(&self, _embed_url: &str, _referer: &str, _sink: &mut dyn LinkSink) -> wsm_core::Result<()> {
        Err(WsmError::Extractor("player offline".to_string()))
    }
}

fn registry() -> ExtractorRegistry {
    let mut registry = ExtractorRegistry::new();
    registry.register(Arc::new(BrokenExtractor));
    registry.register(Arc::new(PlayerExtractor));
    registry
}

#[tokio::test]
async fn main_page_lists_entries_and_paginates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("browse", "series"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="series-item"><a title="Show" href="/Series/show"><img src="/p/show.jpg"></a></div>
               <div class="series-item"><span>broken item</span></div>"#,
        ))
        .mount(&server)
        .await;

    let scraper = scraper_for(&server);
    let home = scraper.main_page(2, 2).await.unwrap();

    assert_eq!(home.name, "Series");
    assert_eq!(home.current_page, 2);
    assert!(home.has_next_page);
    assert_eq!(home.items.len(), 1);
    assert_eq!(home.items[0].url, format!("{}/Series/show", server.uri()));
    assert_eq!(home.items[0].poster_url, Some(format!("{}/p/show.jpg", server.uri())));
    assert_eq!(home.items[0].kind, MediaKind::Series);
}

#[tokio::test]
async fn search_encodes_query() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/search/the%20office",
        r#"<div class="search-result"><a title="The Office" href="/Series/the-office"></a><span class="year">2005</span></div>"#,
    )
    .await;

    let results = scraper_for(&server).search("the office").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "The Office");
    assert_eq!(results[0].year, Some(2005));
}

#[tokio::test]
async fn load_movie_and_series() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/Movies/foo",
        r#"<h1>Foo</h1><span class="duration">98 min</span><div class="actors"><a>Jane Doe</a></div>"#,
    )
    .await;
    serve(
        &server,
        "/Series/bar",
        r#"<h1>Bar</h1><div class="episode" data-season="2" data-episode="3"><a href="/Series/bar/s2e3"></a></div>"#,
    )
    .await;

    let scraper = scraper_for(&server);

    let movie = scraper.load("/Movies/foo").await.unwrap().unwrap();
    assert_eq!(movie.url, format!("{}/Movies/foo", server.uri()));
    assert_eq!(movie.cast, vec!["Jane Doe"]);
    assert_eq!(movie.content, DetailContent::Movie { duration: Some("98 min".to_string()) });

    let series = scraper.load(&format!("{}/Series/bar", server.uri())).await.unwrap().unwrap();
    assert_eq!(series.kind(), MediaKind::Series);
    let episodes = series.episodes().unwrap();
    assert_eq!(episodes.len(), 1);
    assert_eq!((episodes[0].season, episodes[0].episode_number), (2, 3));
}

#[tokio::test]
async fn load_without_title_is_none() {
    let server = MockServer::start().await;
    serve(&server, "/Movies/blank", "<p>nothing</p>").await;

    assert!(scraper_for(&server).load("/Movies/blank").await.unwrap().is_none());
}

#[tokio::test]
async fn load_propagates_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = scraper_for(&server).load("/Movies/gone").await;
    assert!(matches!(result, Err(WsmError::NotFound(_))));
}

#[tokio::test]
async fn load_links_runs_every_pass_and_isolates_failures() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/Movies/foo",
        r#"
        <a href="/download/foo.mp4">Download 720p</a>
        <iframe src="https://broken.player/e/1"></iframe>
        <iframe src="https://unknown.player/e/2"></iframe>
        <iframe src="https://good.player/e/3"></iframe>
        <script>
            var a = "https://cdn.example.com/v/a.m3u8";
            var b = "/relative/b.mp4";
            var c = "https://cdn.example.com/v/a.m3u8";
        </script>"#,
    )
    .await;

    let scraper = scraper_for(&server).with_extractors(registry());
    let mut sink = CollectedLinks::new();
    let page = format!("{}/Movies/foo", server.uri());

    assert!(scraper.load_links(&page, &mut sink).await.unwrap());

    let download = format!("{}/download/foo.mp4", server.uri());
    let urls: Vec<&str> = sink.media_links().iter().map(|l| l.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            download.as_str(),
            "https://cdn.example.com/v/a.m3u8",
            "https://good.player/e/3/master.m3u8",
        ]
    );

    let links = sink.media_links();
    assert_eq!(links[0].quality, Quality::P720);
    assert!(links[1].is_segmented);
    assert!(links.iter().all(|l| l.referer == page));
    assert_eq!(sink.subtitles().len(), 1);
}

#[tokio::test]
async fn load_links_on_empty_page_succeeds_silently() {
    let server = MockServer::start().await;
    serve(&server, "/Movies/empty", "<html><body><p>No links</p></body></html>").await;

    let scraper = scraper_for(&server).with_extractors(registry());
    let mut subtitles = 0;
    let mut media = 0;
    let result = {
        let mut sink = CallbackSink::new(|_| subtitles += 1, |_| media += 1);
        scraper.load_links("/Movies/empty", &mut sink).await.unwrap()
    };

    assert!(result);
    assert_eq!((subtitles, media), (0, 0));
}
