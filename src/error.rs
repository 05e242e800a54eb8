//! Error types for Ladle

use thiserror::Error;

/// Main error type for Ladle operations
#[derive(Error, Debug)]
pub enum LadleError {
    #[error("Invalid API base URL '{0}': {1}")]
    InvalidBaseUrl(String, url::ParseError),

    #[error("API base URL '{0}' cannot carry extra path segments")]
    BaseUrlNotABase(String),

    #[error("Recipe search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Ladle operations
pub type Result<T> = std::result::Result<T, LadleError>;

impl LadleError {
    /// True for errors raised by the fetch path. The TUI collapses all of
    /// these into the no-data display state instead of surfacing them.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            LadleError::Request(_)
                | LadleError::InvalidBaseUrl(_, _)
                | LadleError::BaseUrlNotABase(_)
        )
    }
}
