use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("Crop fragment needs four integers (x,y,w,h), found {found}: {fragment}")]
    InvalidCropFragment { fragment: String, found: usize },

    #[error(transparent)]
    ParseIntError(#[from] std::num::ParseIntError),
}

pub type SpriteResult<T> = Result<T, SpriteError>;
