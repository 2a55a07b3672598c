use thiserror::Error;

#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Invalid document location {0}: {1}")]
    InvalidLocation(String, String),

    #[error("Document location has no path: {0}")]
    CannotBeABase(String),
}

pub type UrlResult<T> = Result<T, UrlError>;
