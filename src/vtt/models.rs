use crate::sprite::models::SpriteDescriptor;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cue {
    pub start: f64,
    pub end: f64,
    pub sprite: SpriteDescriptor,
}

impl Cue {
    /// Half-open: `start <= time < end`.
    pub fn covers(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }
}

/// Cues of one cue-sheet, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CueList {
    cues: Vec<Cue>,
}

impl CueList {
    pub fn new(cues: Vec<Cue>) -> Self {
        Self { cues }
    }

    /// First cue in list order covering `time`.
    pub fn cue_at(&self, time: f64) -> Option<&Cue> {
        self.cues.iter().find(|cue| cue.covers(time))
    }

    pub fn find_at(&self, time: f64) -> Option<&SpriteDescriptor> {
        self.cue_at(time).map(|cue| &cue.sprite)
    }

    /// Largest end time of any cue, 0 for an empty list.
    pub fn duration_covered(&self) -> f64 {
        self.cues.iter().map(|cue| cue.end).fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cue> {
        self.cues.iter()
    }
}

impl<'a> IntoIterator for &'a CueList {
    type Item = &'a Cue;
    type IntoIter = std::slice::Iter<'a, Cue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cues.iter()
    }
}
