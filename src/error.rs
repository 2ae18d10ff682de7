use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Network error: {url} answered with HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Parse error: the selector you are trying to scrape for is invalid. Selector: {0}")]
    ParseInvalidSelector(String),
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Coarse classification of an [`Error`], used by callers that only care
/// whether the failure came from the network, the markup or their own input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Parse,
    Validation,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Reqwest(_) | Error::HttpStatus { .. } => ErrorKind::Network,
            Error::ParseInvalidSelector(_) | Error::Parse(_) => ErrorKind::Parse,
            Error::Validation(_) => ErrorKind::Validation,
        }
    }
}
