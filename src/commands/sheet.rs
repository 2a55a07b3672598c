use clap::{Args, Parser};

/// Where the cue-sheet comes from and how to print results
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Cue-sheet source, absolute or relative to the page url
    #[arg(value_name = "SRC")]
    pub src: String,

    /// Url of the page hosting the player, defaults to the current directory as a file:// url
    #[arg(long, short = 'p', value_name = "PAGE_URL")]
    pub page_url: Option<String>,

    /// Print results as JSON
    #[arg(long, short = 'j', default_value_t = false)]
    pub json: bool,
}

/// Lists every cue of a thumbnail sheet.
#[derive(Parser, Debug, Clone)]
pub struct CuesCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Prints the sprite shown at a playback time.
#[derive(Parser, Debug, Clone)]
pub struct LookupCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Playback time in seconds
    #[arg(long, short = 't', value_name = "SECONDS")]
    pub time: f64,
}

/// Computes where the thumbnail is drawn for a pointer position on the progress track.
#[derive(Parser, Debug, Clone)]
#[command(
    long_about = "Computes where the thumbnail is drawn for a pointer position on the progress track\n\nNote: --width and --height are only used for cues referencing a whole image without a crop fragment"
)]
pub struct LayoutCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Pointer position along the track, 0.0 to 1.0
    #[arg(long, short = 'f', value_name = "FRACTION")]
    pub fraction: f64,

    /// Media duration in seconds
    #[arg(long, short = 'd', value_name = "SECONDS")]
    pub duration: f64,

    /// Progress track width in pixels
    #[arg(long, value_name = "PIXELS")]
    pub track_width: f64,

    /// Thumbnail width for whole-image cues
    #[arg(long, value_name = "PIXELS", requires = "height")]
    pub width: Option<u32>,

    /// Thumbnail height for whole-image cues
    #[arg(long, value_name = "PIXELS", requires = "width")]
    pub height: Option<u32>,
}
