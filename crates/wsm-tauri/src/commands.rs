//! Tauri commands for the WatchSoMuch provider
//!
//! This module contains all Tauri commands that can be invoked from the frontend.

use serde::Serialize;
use tauri::{AppHandle, Emitter, State};

use crate::ProviderState;
use wsm_core::{
    DetailRecord, HomePage, LinkSink, ListingEntry, MainPageRequest, MediaLink, Provider,
    ProviderInfo, SubtitleLink,
};

/// Event carrying one resolved media link
pub const MEDIA_LINK_EVENT: &str = "wsm://media-link";

/// Event carrying one subtitle track
pub const SUBTITLE_EVENT: &str = "wsm://subtitle";

/// Provider metadata together with its home-page sections
#[derive(Debug, Clone, Serialize)]
pub struct ProviderOverview {
    pub info: ProviderInfo,
    pub main_pages: Vec<MainPageRequest>,
}

/// Forwards resolved links to the frontend as they are found.
struct EventSink {
    app: AppHandle,
}

impl LinkSink for EventSink {
    fn on_subtitle(&mut self, subtitle: SubtitleLink) {
        if let Err(e) = self.app.emit(SUBTITLE_EVENT, subtitle) {
            tracing::warn!("Failed to emit subtitle event: {}", e);
        }
    }

    fn on_media_link(&mut self, link: MediaLink) {
        if let Err(e) = self.app.emit(MEDIA_LINK_EVENT, link) {
            tracing::warn!("Failed to emit media link event: {}", e);
        }
    }
}

/// Get provider metadata and the available home-page sections.
#[tauri::command]
pub async fn get_provider_info(state: State<'_, ProviderState>) -> Result<ProviderOverview, String> {
    let scraper = state.scraper();
    Ok(ProviderOverview {
        info: scraper.info(),
        main_pages: scraper.main_page_requests(),
    })
}

/// Get one page of a home-page section.
///
/// # Arguments
/// * `index` - Position of the section in `get_provider_info().main_pages`
/// * `page` - Page number (1-based)
#[tauri::command]
pub async fn get_main_page(
    state: State<'_, ProviderState>,
    index: usize,
    page: u32,
) -> Result<HomePage, String> {
    let scraper = state.scraper();
    scraper.main_page(index, page).await.map_err(|e| e.to_string())
}

/// Search the catalog.
#[tauri::command]
pub async fn search(
    state: State<'_, ProviderState>,
    query: String,
) -> Result<Vec<ListingEntry>, String> {
    let scraper = state.scraper();
    scraper.search(&query).await.map_err(|e| e.to_string())
}

/// Load movie or series details.
///
/// Returns `None` when the page has no title.
#[tauri::command]
pub async fn load(
    state: State<'_, ProviderState>,
    url: String,
) -> Result<Option<DetailRecord>, String> {
    let scraper = state.scraper();
    scraper.load(&url).await.map_err(|e| e.to_string())
}

/// Resolve playable links of a detail page.
///
/// Links are emitted as `wsm://media-link` and `wsm://subtitle` events while
/// resolution runs; the command resolves to `true` when every pass finished.
#[tauri::command]
pub async fn load_links(
    app: AppHandle,
    state: State<'_, ProviderState>,
    url: String,
) -> Result<bool, String> {
    let scraper = state.scraper();
    let mut sink = EventSink { app };
    scraper
        .load_links(&url, &mut sink)
        .await
        .map_err(|e| e.to_string())
}
