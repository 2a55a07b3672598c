use crate::config::error::ConfigError;
use crate::http::error::FetchError;
use crate::url::error::UrlError;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VttThumbnailsError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    FetchError(#[from] FetchError),

    #[error(transparent)]
    UrlError(#[from] UrlError),

    #[error(transparent)]
    ConfigError(#[from] ConfigError),

    #[error("No cue-sheet source given")]
    EmptySource,
}

pub type VttThumbnailsResult<T> = result::Result<T, VttThumbnailsError>;
