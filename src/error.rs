//! Error handling for the lyrseek application
//!
//! Two layers: `LyrseekError` is the application-level error surfaced to the
//! user, `ProviderError` is internal to a single lyrics provider and never
//! crosses the provider boundary. The resolver logs provider failures and
//! treats them the same as "nothing found".

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LyrseekError {
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audio metadata error: {0}")]
    Metadata(#[from] lofty::error::LoftyError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Failure of a single provider lookup stage.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Connection failure, timeout, or a non-200 HTTP status.
    #[error("network failure: {0}")]
    Network(String),

    /// Structured response body does not match the expected shape.
    #[error("unexpected response format: {0}")]
    Format(String),

    /// Lyrics container missing from an otherwise successful page fetch.
    /// Usually means the page layout changed or the content was removed.
    #[error("lyrics container not found on page")]
    Parse,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Format(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LyrseekError>;
