//! Music API client errors.

use thiserror::Error;

/// Errors returned by a [`super::MusicApi`] implementation.
#[derive(Debug, Error)]
pub enum MusicApiError {
    /// The provider rejected the access token (HTTP 401).
    #[error("access token rejected by music API")]
    Unauthorized,

    #[error("network error: {0}")]
    Network(String),

    /// Any other non-success response.
    #[error("music API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse music API response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for MusicApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
