//! HTML parsers for WatchSoMuch pages
//!
//! This module contains parsers for extracting data from WatchSoMuch pages:
//! - `listing`: Normalize catalog items of browse and search pages
//! - `detail`: Parse movie and series detail pages
//! - `episodes`: Parse episode entries of a series page
//! - `links`: Discover playable links on a detail page
//!
//! Parsers are pure functions over already-fetched HTML. Missing optional
//! fields fall back to their defaults and a missing required field drops
//! only the item it belongs to.

pub mod detail;
pub mod episodes;
pub mod links;
pub mod listing;

// Re-export main parsing functions
pub use detail::{parse_detail, parse_rating};
pub use episodes::{parse_episode, parse_episodes};
pub use links::{discover_links, DiscoveredLinks};
pub use listing::{normalize_entry, parse_listing};

/// Parse a year such as `"2021"`; anything else is `None`.
pub fn parse_year(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2021"), Some(2021));
        assert_eq!(parse_year(" 1999 "), Some(1999));
        assert_eq!(parse_year("(2021)"), None);
        assert_eq!(parse_year("TBA"), None);
        assert_eq!(parse_year(""), None);
    }
}
