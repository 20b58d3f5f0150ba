//! WatchSoMuch Provider Tauri Integration
//!
//! This crate provides Tauri commands for integrating the WatchSoMuch
//! provider into Tauri 2.0 applications.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wsm_tauri::ProviderState;
//! use tauri::Manager;
//!
//! fn main() {
//!     tauri::Builder::default()
//!         .setup(|app| {
//!             app.manage(ProviderState::new()?);
//!             Ok(())
//!         })
//!         .invoke_handler(tauri::generate_handler![
//!             wsm_tauri::commands::get_provider_info,
//!             wsm_tauri::commands::get_main_page,
//!             wsm_tauri::commands::search,
//!             wsm_tauri::commands::load,
//!             wsm_tauri::commands::load_links,
//!         ])
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! # Commands
//! - `get_provider_info` - Provider metadata and home-page sections
//! - `get_main_page` - One page of a home-page section
//! - `search` - Search the catalog
//! - `load` - Movie or series details
//! - `load_links` - Resolve playable links, streamed as events

pub mod commands;

use std::sync::Arc;

use wsm_core::{ExtractorRegistry, WsmScraper};

/// Shared WsmScraper managed by Tauri.
///
/// Provider calls take `&self`, so commands run concurrently without a lock.
pub struct ProviderState {
    scraper: Arc<WsmScraper>,
}

impl ProviderState {
    /// Create a new ProviderState with default configuration.
    ///
    /// # Errors
    /// Returns an error string if the scraper cannot be created.
    pub fn new() -> Result<Self, String> {
        let scraper = WsmScraper::new().map_err(|e| e.to_string())?;
        Ok(Self::from_scraper(scraper))
    }

    /// Create a ProviderState that resolves embedded players with `extractors`.
    ///
    /// # Errors
    /// Returns an error string if the scraper cannot be created.
    pub fn with_extractors(extractors: ExtractorRegistry) -> Result<Self, String> {
        let scraper = WsmScraper::new().map_err(|e| e.to_string())?;
        Ok(Self::from_scraper(scraper.with_extractors(extractors)))
    }

    pub fn from_scraper(scraper: WsmScraper) -> Self {
        Self {
            scraper: Arc::new(scraper),
        }
    }

    /// Get a reference to the inner scraper.
    pub fn scraper(&self) -> &Arc<WsmScraper> {
        &self.scraper
    }
}
