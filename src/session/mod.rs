use crate::config::ThumbnailsConfig;
use crate::error::{VttThumbnailsError, VttThumbnailsResult};
use crate::geometry::{GeometryEngine, Placement, ThumbnailSize};
use crate::http::CueSheetFetcher;
use crate::http::error::FetchResult;
use crate::prefetch::SharedPrefetchCache;
use crate::sprite::models::SpriteDescriptor;
use crate::url::{DocumentLocation, resolve};
use crate::vtt::{ParseReport, VttParser};
use crate::vtt::models::CueList;
use crate::vtt::timestamp::TimestampPrecision;
use log::{debug, info, warn};

pub mod sink;

pub use sink::{RecordingSink, SinkEvent, ThumbnailSink};

/// What the host player reports about itself.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerState {
    pub duration: f64,
    pub track_width: f64,
    /// Size used for whole-image sprites, which carry none of their own.
    pub thumbnail_size: Option<ThumbnailSize>,
}

/// An in-flight cue-sheet load. Only the ticket of the latest load can complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    source: String,
    url: String,
}

impl LoadTicket {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Absolute URL to fetch.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Thumbnails for one player: the loaded cue list plus pointer tracking.
pub struct ThumbnailSession<F, S> {
    fetcher: F,
    sink: S,
    location: DocumentLocation,
    prefetch: SharedPrefetchCache,
    engine: GeometryEngine,
    precision: TimestampPrecision,
    generation: u64,
    cues: Option<CueList>,
    state: PlayerState,
    hovering: bool,
    visible: bool,
}

impl<F: CueSheetFetcher, S: ThumbnailSink> ThumbnailSession<F, S> {
    pub fn new(
        fetcher: F,
        sink: S,
        location: DocumentLocation,
        prefetch: SharedPrefetchCache,
        config: &ThumbnailsConfig,
    ) -> Self {
        Self {
            fetcher,
            sink,
            location,
            prefetch,
            engine: GeometryEngine::new(config.geometry),
            precision: config.timestamp_precision,
            generation: 0,
            cues: None,
            state: PlayerState::default(),
            hovering: false,
            visible: false,
        }
    }

    /// Fetches and parses `source`, replacing whatever was loaded before.
    ///
    /// Returns true when a cue list is now active.
    pub async fn load_source(&mut self, source: &str) -> bool {
        let ticket = match self.begin_load(source) {
            Some(ticket) => ticket,
            None => return false,
        };

        let result = self.fetcher.fetch(ticket.url()).await;

        self.complete_load(ticket, result)
    }

    /// Drops the current cue list and starts a new load generation.
    ///
    /// Returns `None` for an empty source; thumbnails stay disabled then.
    pub fn begin_load(&mut self, source: &str) -> Option<LoadTicket> {
        self.reset();

        if source.trim().is_empty() {
            debug!("No cue-sheet source, thumbnails disabled");
            return None;
        }

        let url = cue_sheet_url(source, &self.location);

        debug!("Loading cue-sheet {url} (generation {})", self.generation);

        Some(LoadTicket {
            generation: self.generation,
            source: source.to_string(),
            url,
        })
    }

    /// Applies a fetch result; stale tickets and failures leave no cue list.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: FetchResult<String>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding cue-sheet {} from stale generation {} (current {})",
                ticket.url, ticket.generation, self.generation
            );
            return false;
        }

        let text = match result {
            Ok(text) => text,
            Err(e) => {
                warn!("Could not load cue-sheet {}: {e}", ticket.url);
                return false;
            }
        };

        let cues = VttParser::new(&ticket.source, &self.location)
            .with_precision(self.precision)
            .parse(&text);

        info!("Loaded {} thumbnail cues from {}", cues.len(), ticket.url);

        self.cues = Some(cues);
        true
    }

    pub fn detach(&mut self) {
        self.reset();
    }

    pub fn set_player_state(&mut self, state: PlayerState) {
        self.state = state;
    }

    pub fn pointer_enter(&mut self) {
        if self.cues.is_none() {
            return;
        }
        self.hovering = true;
        self.show(true);
    }

    pub fn pointer_leave(&mut self) {
        if !self.hovering {
            return;
        }
        self.hovering = false;
        self.show(false);
    }

    /// Handles one pointer sample at `pointer_fraction` along the track.
    pub fn pointer_move(&mut self, pointer_fraction: f64) -> Option<Placement> {
        if !self.hovering {
            return None;
        }
        let cues = self.cues.as_ref()?;

        let fraction = pointer_fraction.clamp(0.0, 1.0);
        let time = fraction * self.state.duration;
        let descriptor = cues.find_at(time);

        if let Some(descriptor) = descriptor {
            let url = descriptor.dedupe_key();
            if self.prefetch.borrow_mut().touch(url) {
                self.sink.preload(url);
            }
        }

        let placement = self.engine.place(
            fraction,
            self.state.track_width,
            descriptor,
            self.state.thumbnail_size,
        );

        let (placement, descriptor) = match (placement, descriptor) {
            (Some(placement), Some(descriptor)) => (placement, descriptor),
            _ => {
                if self.visible {
                    self.visible = false;
                    self.sink.set_visible(false);
                }
                return None;
            }
        };

        if let Some(geometry) = &placement.geometry {
            self.sink.apply_geometry(geometry);
        }
        if placement.style_changed {
            self.sink.apply_style(&descriptor.style());
        }
        if !self.visible {
            self.visible = true;
            self.sink.set_visible(true);
        }

        Some(placement)
    }

    pub fn cues(&self) -> Option<&CueList> {
        self.cues.as_ref()
    }

    pub fn active_sprite(&self, time: f64) -> Option<&SpriteDescriptor> {
        self.cues.as_ref()?.find_at(time)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.cues = None;
        self.engine.reset();
        self.hovering = false;
        self.show(false);
    }

    fn show(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.sink.set_visible(visible);
        }
    }
}

/// Absolute URL of `source`; protocol-relative results take the document's scheme.
pub fn cue_sheet_url(source: &str, location: &DocumentLocation) -> String {
    let url = resolve(source, &location.base_url());
    if url.starts_with("//") {
        return format!("{}{}", location.protocol, url);
    }
    url
}

/// Fetches and parses a cue-sheet once, without pointer tracking.
pub async fn fetch_cue_sheet<F: CueSheetFetcher>(
    fetcher: &mut F,
    source: &str,
    location: &DocumentLocation,
    precision: TimestampPrecision,
) -> VttThumbnailsResult<ParseReport> {
    if source.trim().is_empty() {
        return Err(VttThumbnailsError::EmptySource);
    }

    let url = cue_sheet_url(source, location);
    let text = fetcher.fetch(&url).await?;

    Ok(VttParser::new(source, location)
        .with_precision(precision)
        .parse_report(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::error::FetchError;
    use crate::prefetch::PrefetchCache;
    use std::collections::HashMap;

    const SHEET: &str = "WEBVTT

00:00.000 --> 00:05.000
sprite.jpg#xywh=0,0,160,90

00:05.000 --> 00:10.000
sprite.jpg#xywh=160,0,160,90
";

    #[derive(Default)]
    struct FakeFetcher {
        sheets: HashMap<String, String>,
        requested: Vec<String>,
    }

    impl FakeFetcher {
        fn with(url: &str, text: &str) -> Self {
            let mut fetcher = Self::default();
            fetcher.sheets.insert(url.to_string(), text.to_string());
            fetcher
        }
    }

    impl CueSheetFetcher for FakeFetcher {
        async fn fetch(&mut self, url: &str) -> FetchResult<String> {
            self.requested.push(url.to_string());
            self.sheets
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::InvalidFilePath(url.to_string()))
        }
    }

    fn location() -> DocumentLocation {
        DocumentLocation::parse("https://example.com/watch/index.html").unwrap()
    }

    fn session(fetcher: FakeFetcher) -> ThumbnailSession<FakeFetcher, RecordingSink> {
        let mut session = ThumbnailSession::new(
            fetcher,
            RecordingSink::new(),
            location(),
            PrefetchCache::shared(),
            &ThumbnailsConfig::default(),
        );
        session.set_player_state(PlayerState {
            duration: 10.0,
            track_width: 800.0,
            thumbnail_size: None,
        });
        session
    }

    #[tokio::test]
    async fn relative_source_is_fetched_from_document_base() {
        let fetcher = FakeFetcher::with("https://example.com/watch/media/thumbs.vtt", SHEET);
        let mut session = session(fetcher);

        assert!(session.load_source("media/thumbs.vtt").await);
        assert_eq!(session.cues().map(CueList::len), Some(2));
        assert_eq!(
            session.active_sprite(1.0).map(|s| s.image_url()),
            Some("https://example.com/watch/media/sprite.jpg")
        );
    }

    #[tokio::test]
    async fn protocol_relative_source_uses_document_protocol() {
        let fetcher = FakeFetcher::with("https://cdn.example.com/thumbs.vtt", SHEET);
        let mut session = session(fetcher);

        assert!(session.load_source("//cdn.example.com/thumbs.vtt").await);
    }

    #[tokio::test]
    async fn failed_fetch_disables_thumbnails() {
        let mut session = session(FakeFetcher::default());

        assert!(!session.load_source("missing.vtt").await);
        assert!(session.cues().is_none());

        session.pointer_enter();
        assert_eq!(session.pointer_move(0.5), None);
        assert!(session.sink().events.is_empty());
    }

    #[tokio::test]
    async fn empty_source_does_not_fetch() {
        let mut session = session(FakeFetcher::default());
        assert!(!session.load_source("  ").await);
        assert!(session.fetcher.requested.is_empty());
    }

    #[tokio::test]
    async fn one_shot_fetch_reports_cues() {
        let mut fetcher = FakeFetcher::with("https://example.com/watch/thumbs.vtt", SHEET);

        let report = fetch_cue_sheet(&mut fetcher, "thumbs.vtt", &location(), TimestampPrecision::Truncate)
            .await
            .unwrap();
        assert_eq!(report.cues.len(), 2);
        assert_eq!(report.skipped_blocks, 1);

        assert!(matches!(
            fetch_cue_sheet(&mut fetcher, "", &location(), TimestampPrecision::Truncate).await,
            Err(VttThumbnailsError::EmptySource)
        ));
        assert!(matches!(
            fetch_cue_sheet(&mut fetcher, "gone.vtt", &location(), TimestampPrecision::Truncate).await,
            Err(VttThumbnailsError::FetchError(_))
        ));
    }

    #[test]
    fn cue_sheet_url_resolves_against_document() {
        assert_eq!(
            cue_sheet_url("thumbs.vtt", &location()),
            "https://example.com/watch/thumbs.vtt"
        );
        assert_eq!(
            cue_sheet_url("http://cdn.example.com/t.vtt", &location()),
            "http://cdn.example.com/t.vtt"
        );
        assert_eq!(
            cue_sheet_url("//cdn.example.com/t.vtt", &location()),
            "https://cdn.example.com/t.vtt"
        );
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut session = session(FakeFetcher::default());

        let first = session.begin_load("old.vtt").unwrap();
        let second = session.begin_load("new.vtt").unwrap();

        assert!(!session.complete_load(first, Ok(SHEET.to_string())));
        assert!(session.cues().is_none());

        assert!(session.complete_load(second, Ok(SHEET.to_string())));
        assert_eq!(session.cues().map(CueList::len), Some(2));
    }

    #[test]
    fn detach_invalidates_in_flight_load() {
        let mut session = session(FakeFetcher::default());

        let ticket = session.begin_load("thumbs.vtt").unwrap();
        session.detach();

        assert!(!session.complete_load(ticket, Ok(SHEET.to_string())));
        assert!(session.cues().is_none());
    }

    #[test]
    fn pointer_samples_position_and_style_the_thumbnail() {
        let mut session = session(FakeFetcher::default());
        let ticket = session.begin_load("thumbs.vtt").unwrap();
        session.complete_load(ticket, Ok(SHEET.to_string()));

        // Moves before entering are ignored.
        assert_eq!(session.pointer_move(0.5), None);

        session.pointer_enter();
        let placement = session.pointer_move(0.5).unwrap();
        assert!(placement.style_changed);
        assert_eq!(placement.geometry.unwrap().translate_x, 320.0);

        let sink = session.sink();
        assert!(sink.is_visible());
        assert_eq!(
            sink.last_style().unwrap().background,
            "url(\"https://example.com/watch/sprite.jpg\") no-repeat -160px -0px"
        );
        assert_eq!(sink.preloads(), vec!["https://example.com/watch/sprite.jpg"]);

        // Same cue again: geometry only.
        let placement = session.pointer_move(0.6).unwrap();
        assert!(!placement.style_changed);

        // Other tile of the same sheet: new style, no new preload.
        let placement = session.pointer_move(0.1).unwrap();
        assert!(placement.style_changed);
        assert_eq!(session.sink().preloads().len(), 1);

        session.pointer_leave();
        assert!(!session.sink().is_visible());
    }

    #[test]
    fn time_outside_every_cue_hides_the_thumbnail() {
        let mut session = session(FakeFetcher::default());
        session.set_player_state(PlayerState {
            duration: 20.0,
            track_width: 800.0,
            thumbnail_size: None,
        });
        let ticket = session.begin_load("thumbs.vtt").unwrap();
        session.complete_load(ticket, Ok(SHEET.to_string()));

        session.pointer_enter();
        assert!(session.pointer_move(0.1).is_some());
        assert_eq!(session.pointer_move(0.75), None);
        assert!(!session.sink().is_visible());

        // Coming back into a cue shows it again.
        assert!(session.pointer_move(0.1).is_some());
        assert!(session.sink().is_visible());
    }

    #[test]
    fn sessions_sharing_a_cache_preload_once() {
        let cache = PrefetchCache::shared();
        let config = ThumbnailsConfig::default();
        let state = PlayerState {
            duration: 10.0,
            track_width: 800.0,
            thumbnail_size: None,
        };

        let mut sessions: Vec<_> = (0..2)
            .map(|_| {
                let mut session = ThumbnailSession::new(
                    FakeFetcher::default(),
                    RecordingSink::new(),
                    location(),
                    cache.clone(),
                    &config,
                );
                session.set_player_state(state);
                let ticket = session.begin_load("thumbs.vtt").unwrap();
                session.complete_load(ticket, Ok(SHEET.to_string()));
                session.pointer_enter();
                session
            })
            .collect();

        sessions[0].pointer_move(0.1);
        sessions[1].pointer_move(0.1);

        assert_eq!(sessions[0].sink().preloads().len(), 1);
        assert!(sessions[1].sink().preloads().is_empty());
        assert_eq!(cache.borrow().len(), 1);
    }
}
