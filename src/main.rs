use crate::commands::sheet::{CuesCommand, LayoutCommand, LookupCommand, SourceArgs};
use crate::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use reqwest::Url;
use serde::Serialize;
use vtt_thumbnails::config::ThumbnailsConfig;
use vtt_thumbnails::http::SourceFetcher;
use vtt_thumbnails::session::{RecordingSink, fetch_cue_sheet};
use vtt_thumbnails::sprite::models::ThumbnailStyle;
use vtt_thumbnails::vtt::ParseReport;
use vtt_thumbnails::{
    DocumentLocation, GeometryResult, PlayerState, PrefetchCache, SpriteDescriptor,
    ThumbnailSession, ThumbnailSize,
};

mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()?;

    let config = ThumbnailsConfig::from_env()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Cues(cmd) => list_cues(&config, cmd).await?,
        Commands::Lookup(cmd) => lookup(&config, cmd).await?,
        Commands::Layout(cmd) => layout(&config, cmd).await?,
    }

    Ok(())
}

fn document_location(args: &SourceArgs) -> Result<DocumentLocation> {
    let page_url = match &args.page_url {
        Some(page_url) => page_url.clone(),
        None => {
            let cwd = std::env::current_dir()?;
            Url::from_directory_path(&cwd)
                .map_err(|_| anyhow::anyhow!("Cannot express {cwd:?} as a file url"))?
                .to_string()
        }
    };

    Ok(DocumentLocation::parse(&page_url)?)
}

async fn load_report(config: &ThumbnailsConfig, args: &SourceArgs) -> Result<ParseReport> {
    let location = document_location(args)?;
    let mut fetcher = SourceFetcher::new(config)?;

    let report = fetch_cue_sheet(&mut fetcher, &args.src, &location, config.timestamp_precision)
        .await
        .with_context(|| format!("Loading cue-sheet {}", args.src))?;

    info!(
        "{} cues, {} blocks skipped, {} cues rejected, {} timestamp warnings",
        report.cues.len(),
        report.skipped_blocks,
        report.rejected_cues,
        report.timestamp_warnings
    );

    Ok(report)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn describe(sprite: &SpriteDescriptor) -> String {
    match sprite.crop() {
        Some(crop) => format!(
            "{} [x={} y={} w={} h={}]",
            sprite.image_url(),
            crop.x,
            crop.y,
            crop.w,
            crop.h
        ),
        None => sprite.image_url().to_string(),
    }
}

async fn list_cues(config: &ThumbnailsConfig, cmd: CuesCommand) -> Result<()> {
    let report = load_report(config, &cmd.source).await?;

    if cmd.source.json {
        return print_json(&report);
    }

    for cue in &report.cues {
        println!("{:>10.3} --> {:<10.3} {}", cue.start, cue.end, describe(&cue.sprite));
    }

    Ok(())
}

async fn lookup(config: &ThumbnailsConfig, cmd: LookupCommand) -> Result<()> {
    let report = load_report(config, &cmd.source).await?;
    let sprite = report.cues.find_at(cmd.time);

    if cmd.source.json {
        return print_json(&sprite);
    }

    match sprite {
        Some(sprite) => println!("{}", describe(sprite)),
        None => println!("No thumbnail at {}s", cmd.time),
    }

    Ok(())
}

#[derive(Serialize)]
struct LayoutOutput<'a> {
    time: f64,
    sprite: Option<&'a SpriteDescriptor>,
    geometry: Option<GeometryResult>,
    transform: Option<String>,
    bottom: Option<String>,
    style: Option<&'a ThumbnailStyle>,
}

async fn layout(config: &ThumbnailsConfig, cmd: LayoutCommand) -> Result<()> {
    let location = document_location(&cmd.source)?;
    let fetcher = SourceFetcher::new(config)?;

    let mut session = ThumbnailSession::new(
        fetcher,
        RecordingSink::new(),
        location,
        PrefetchCache::shared(),
        config,
    );

    let thumbnail_size = match (cmd.width, cmd.height) {
        (Some(width), Some(height)) => Some(ThumbnailSize { width, height }),
        _ => None,
    };
    session.set_player_state(PlayerState {
        duration: cmd.duration,
        track_width: cmd.track_width,
        thumbnail_size,
    });

    if !session.load_source(&cmd.source.src).await {
        bail!("Could not load cue-sheet {}", cmd.source.src);
    }

    session.pointer_enter();
    let placement = session.pointer_move(cmd.fraction);

    let time = cmd.fraction.clamp(0.0, 1.0) * cmd.duration;
    let geometry = placement.and_then(|placement| placement.geometry);
    let output = LayoutOutput {
        time,
        sprite: session.active_sprite(time),
        geometry,
        transform: geometry.map(|g| g.transform_css()),
        bottom: geometry.map(|g| g.bottom_css()),
        style: session.sink().last_style(),
    };

    if cmd.source.json {
        return print_json(&output);
    }

    match output.sprite {
        None => println!("No thumbnail at {time}s, thumbnail hidden"),
        Some(sprite) => {
            println!("time:       {time}s");
            println!("sprite:     {}", describe(sprite));
            if let Some(style) = output.style {
                println!("background: {}", style.background);
            }
            match (&output.transform, &output.bottom) {
                (Some(transform), Some(bottom)) => {
                    println!("transform:  {transform}");
                    println!("bottom:     {bottom}");
                }
                _ => println!("transform:  unknown thumbnail size, pass --width and --height"),
            }
        }
    }

    Ok(())
}
