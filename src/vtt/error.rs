use crate::sprite::error::SpriteError;
use thiserror::Error;

/// Reasons a single cue is dropped; none of them stop the parse.
#[derive(Debug, Error)]
pub enum VttError {
    #[error("Invalid timing line: {0}")]
    InvalidTimingLine(String),

    #[error("Cue at {timing} has no sprite reference")]
    MissingSpriteReference { timing: String },

    #[error(transparent)]
    SpriteError(#[from] SpriteError),
}

pub type VttResult<T> = Result<T, VttError>;
