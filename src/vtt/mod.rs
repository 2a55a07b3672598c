use crate::sprite::SpriteResolver;
use crate::url::{DocumentLocation, trim};
use crate::vtt::error::{VttError, VttResult};
use crate::vtt::models::{Cue, CueList};
use crate::vtt::timestamp::{TimestampPrecision, decode_checked};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use serde::Serialize;

pub mod error;
pub mod models;
pub mod timestamp;

lazy_static! {
    static ref LINE_BREAK: Regex = Regex::new(r"\r\n|\r|\n").unwrap();
    static ref TIMING: Regex = Regex::new(r"\d+(?:\.\d+)?[ \t]*-->[ \t]*\d").unwrap();
}

/// Outcome of parsing one cue-sheet, with counters for what was dropped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseReport {
    pub cues: CueList,
    /// Blocks without a timing line and reference (headers, NOTE, STYLE, junk).
    pub skipped_blocks: usize,
    /// Cues whose sprite reference could not be resolved.
    pub rejected_cues: usize,
    pub timestamp_warnings: usize,
}

pub struct VttParser {
    sprites: SpriteResolver,
    precision: TimestampPrecision,
}

impl VttParser {
    pub fn new(cue_sheet_url: &str, location: &DocumentLocation) -> Self {
        Self {
            sprites: SpriteResolver::new(cue_sheet_url, location),
            precision: TimestampPrecision::default(),
        }
    }

    pub fn with_precision(mut self, precision: TimestampPrecision) -> Self {
        self.precision = precision;
        self
    }

    pub fn parse(&self, raw_text: &str) -> CueList {
        self.parse_report(raw_text).cues
    }

    pub fn parse_report(&self, raw_text: &str) -> ParseReport {
        let mut report = ParseReport::default();
        let mut cues = Vec::new();

        for block in split_blocks(raw_text) {
            match self.parse_block(&block, &mut report) {
                Ok(cue) => cues.push(cue),
                Err(VttError::SpriteError(e)) => {
                    warn!("Skipping cue with unusable sprite reference: {e}");
                    report.rejected_cues += 1;
                }
                Err(e) => {
                    debug!("Skipping block: {e}");
                    report.skipped_blocks += 1;
                }
            }
        }

        debug!(
            "Parsed {} cues ({} blocks skipped, {} cues rejected)",
            cues.len(),
            report.skipped_blocks,
            report.rejected_cues
        );

        report.cues = CueList::new(cues);
        report
    }

    fn parse_block(&self, lines: &[&str], report: &mut ParseReport) -> VttResult<Cue> {
        // The timing line normally leads the block; a cue identifier may precede it.
        let timing_index = lines
            .iter()
            .position(|line| TIMING.is_match(line))
            .ok_or_else(|| VttError::InvalidTimingLine(lines.first().unwrap_or(&"").to_string()))?;

        let timing_line = lines[timing_index];
        let reference = lines
            .get(timing_index + 1)
            .map(|line| trim(line, &[]))
            .filter(|line| !line.is_empty())
            .ok_or_else(|| VttError::MissingSpriteReference {
                timing: timing_line.to_string(),
            })?;

        let (start, end) = split_timing(timing_line)?;
        let start = self.decode(start, report);
        let end = self.decode(end, report);
        let sprite = self.sprites.resolve(reference)?;

        Ok(Cue { start, end, sprite })
    }

    fn decode(&self, text: &str, report: &mut ParseReport) -> f64 {
        decode_checked(text, self.precision).unwrap_or_else(|warning| {
            debug!("{warning}");
            report.timestamp_warnings += 1;
            warning.fallback
        })
    }
}

/// Start and end text of a timing line; cue settings after the end are dropped.
fn split_timing(timing_line: &str) -> VttResult<(&str, &str)> {
    let (start, rest) = timing_line
        .split_once("-->")
        .ok_or_else(|| VttError::InvalidTimingLine(timing_line.to_string()))?;

    let end = trim(rest, &[]).split_whitespace().next().unwrap_or_default();

    Ok((trim(start, &[]), end))
}

/// Splits on blank lines, accepting `\n`, `\r\n` and `\r` line breaks.
fn split_blocks(raw_text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in LINE_BREAK.split(raw_text) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}
