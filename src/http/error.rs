use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    RequestError(#[from] reqwest::Error),

    #[error("Request returned non-success status code {0}: {1}")]
    NoSuccessStatusCode(StatusCode, String),

    #[error("Invalid cue-sheet url {0}: {1}")]
    InvalidUrl(String, String),

    #[error("Unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Url does not point to a local file: {0}")]
    InvalidFilePath(String),

    #[error("Cue-sheet {url} is larger than {limit} bytes")]
    TooLarge { url: String, limit: usize },
}

pub type FetchResult<T> = Result<T, FetchError>;
