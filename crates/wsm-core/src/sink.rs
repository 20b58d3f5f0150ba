//! Consumers of resolved links
//!
//! Links are pushed to a [`LinkSink`] one at a time as they are found, so
//! callers can start playback before resolution finishes.

use tokio::sync::mpsc::UnboundedSender;

use crate::types::{LinkEvent, MediaLink, SubtitleLink};

/// Receiver of links emitted during resolution
pub trait LinkSink: Send {
    fn on_subtitle(&mut self, subtitle: SubtitleLink);
    fn on_media_link(&mut self, link: MediaLink);
}

/// Sink built from a pair of closures
pub struct CallbackSink<S, M> {
    on_subtitle: S,
    on_media_link: M,
}

impl<S, M> CallbackSink<S, M>
where
    S: FnMut(SubtitleLink) + Send,
    M: FnMut(MediaLink) + Send,
{
    pub fn new(on_subtitle: S, on_media_link: M) -> Self {
        Self {
            on_subtitle,
            on_media_link,
        }
    }
}

impl<S, M> LinkSink for CallbackSink<S, M>
where
    S: FnMut(SubtitleLink) + Send,
    M: FnMut(MediaLink) + Send,
{
    fn on_subtitle(&mut self, subtitle: SubtitleLink) {
        (self.on_subtitle)(subtitle)
    }

    fn on_media_link(&mut self, link: MediaLink) {
        (self.on_media_link)(link)
    }
}

/// Sink that keeps every event in arrival order
#[derive(Debug, Clone, Default)]
pub struct CollectedLinks {
    pub events: Vec<LinkEvent>,
}

impl CollectedLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected media links in arrival order
    pub fn media_links(&self) -> Vec<&MediaLink> {
        self.events
            .iter()
            .filter_map(|event| match event {
                LinkEvent::MediaLink(link) => Some(link),
                LinkEvent::Subtitle(_) => None,
            })
            .collect()
    }

    /// Collected subtitles in arrival order
    pub fn subtitles(&self) -> Vec<&SubtitleLink> {
        self.events
            .iter()
            .filter_map(|event| match event {
                LinkEvent::Subtitle(subtitle) => Some(subtitle),
                LinkEvent::MediaLink(_) => None,
            })
            .collect()
    }
}

impl LinkSink for CollectedLinks {
    fn on_subtitle(&mut self, subtitle: SubtitleLink) {
        self.events.push(LinkEvent::Subtitle(subtitle));
    }

    fn on_media_link(&mut self, link: MediaLink) {
        self.events.push(LinkEvent::MediaLink(link));
    }
}

/// Forwards events to a channel; a closed receiver drops them.
impl LinkSink for UnboundedSender<LinkEvent> {
    fn on_subtitle(&mut self, subtitle: SubtitleLink) {
        if self.send(LinkEvent::Subtitle(subtitle)).is_err() {
            tracing::debug!("Link receiver closed, dropping subtitle");
        }
    }

    fn on_media_link(&mut self, link: MediaLink) {
        if self.send(LinkEvent::MediaLink(link)).is_err() {
            tracing::debug!("Link receiver closed, dropping media link");
        }
    }
}
