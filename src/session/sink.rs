use crate::geometry::GeometryResult;
use crate::sprite::models::ThumbnailStyle;

/// Renderable surface the session drives.
pub trait ThumbnailSink {
    fn apply_style(&mut self, style: &ThumbnailStyle);

    fn apply_geometry(&mut self, geometry: &GeometryResult);

    fn set_visible(&mut self, visible: bool);

    /// Called once per sprite URL the first time it is needed.
    fn preload(&mut self, _url: &str) {}
}

/// Everything a sink was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Style(ThumbnailStyle),
    Geometry(GeometryResult),
    Visible(bool),
    Preload(String),
}

/// Sink that keeps a log of calls; used by the CLI and tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_style(&self) -> Option<&ThumbnailStyle> {
        self.events.iter().rev().find_map(|event| match event {
            SinkEvent::Style(style) => Some(style),
            _ => None,
        })
    }

    pub fn last_geometry(&self) -> Option<&GeometryResult> {
        self.events.iter().rev().find_map(|event| match event {
            SinkEvent::Geometry(geometry) => Some(geometry),
            _ => None,
        })
    }

    pub fn is_visible(&self) -> bool {
        self.events
            .iter()
            .rev()
            .find_map(|event| match event {
                SinkEvent::Visible(visible) => Some(*visible),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn preloads(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Preload(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ThumbnailSink for RecordingSink {
    fn apply_style(&mut self, style: &ThumbnailStyle) {
        self.events.push(SinkEvent::Style(style.clone()));
    }

    fn apply_geometry(&mut self, geometry: &GeometryResult) {
        self.events.push(SinkEvent::Geometry(*geometry));
    }

    fn set_visible(&mut self, visible: bool) {
        self.events.push(SinkEvent::Visible(visible));
    }

    fn preload(&mut self, url: &str) {
        self.events.push(SinkEvent::Preload(url.to_string()));
    }
}
