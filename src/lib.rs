pub mod config;
pub mod error;
pub mod geometry;
pub mod http;
pub mod prefetch;
pub mod session;
pub mod sprite;
pub mod url;
pub mod vtt;

pub use crate::error::{VttThumbnailsError, VttThumbnailsResult};
pub use crate::geometry::{GeometryEngine, GeometryResult, Placement, ThumbnailSize};
pub use crate::prefetch::{PrefetchCache, SharedPrefetchCache};
pub use crate::session::{PlayerState, ThumbnailSession, ThumbnailSink};
pub use crate::sprite::models::{Crop, SpriteDescriptor};
pub use crate::url::DocumentLocation;
pub use crate::vtt::VttParser;
pub use crate::vtt::models::{Cue, CueList};
