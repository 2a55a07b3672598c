use crate::sprite::error::{SpriteError, SpriteResult};
use crate::sprite::models::{Crop, SpriteDescriptor};
use crate::url::{DocumentLocation, directory_of, resolve};
use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;

pub mod error;
pub mod models;

lazy_static! {
    static ref CROP_MARKER: Regex = Regex::new(r"(?i)#xywh=").unwrap();
    static ref INTEGER_RUN: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// Turns the reference line of a cue into a [`SpriteDescriptor`].
///
/// Relative references are resolved against the directory of the cue-sheet.
/// When the cue-sheet URL is itself relative, that directory is taken relative
/// to the document base URL.
#[derive(Debug, Clone)]
pub struct SpriteResolver {
    context_base: String,
}

impl SpriteResolver {
    pub fn new(cue_sheet_url: &str, location: &DocumentLocation) -> Self {
        let context_base = if cue_sheet_url.contains("//") {
            directory_of(cue_sheet_url).to_string()
        } else {
            format!("{}{}", location.base_url(), directory_of(cue_sheet_url))
        };

        Self { context_base }
    }

    pub fn context_base(&self) -> &str {
        &self.context_base
    }

    pub fn resolve(&self, raw_reference: &str) -> SpriteResult<SpriteDescriptor> {
        let resolved = resolve(raw_reference, &self.context_base);

        let mut pieces = CROP_MARKER.splitn(&resolved, 3);
        let image_url = pieces.next().unwrap_or_default().to_string();
        let fragment = match pieces.next() {
            Some(fragment) => fragment,
            None => return Ok(SpriteDescriptor::Whole { image_url }),
        };

        let crop = parse_crop(fragment)?;

        Ok(SpriteDescriptor::Cropped { image_url, crop })
    }
}

/// Reads the first four digit runs of `fragment` as `x, y, w, h`.
fn parse_crop(fragment: &str) -> SpriteResult<Crop> {
    // `%2C` would otherwise contribute a stray `2`.
    let decoded = percent_decode_str(fragment).decode_utf8_lossy();
    let runs: Vec<&str> = INTEGER_RUN
        .find_iter(&decoded)
        .take(4)
        .map(|m| m.as_str())
        .collect();

    if runs.len() < 4 {
        return Err(SpriteError::InvalidCropFragment {
            fragment: fragment.to_string(),
            found: runs.len(),
        });
    }

    Ok(Crop {
        x: runs[0].parse()?,
        y: runs[1].parse()?,
        w: runs[2].parse()?,
        h: runs[3].parse()?,
    })
}
