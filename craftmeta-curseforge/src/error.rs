use craftmeta_core::TransportError;

use crate::search::SearchRequestError;

/// Errors returned by [`CurseForgeClient`](crate::CurseForgeClient) and the
/// credential helpers.
#[derive(Debug, thiserror::Error)]
pub enum CurseForgeError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid response from server")]
    InvalidResponse,

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("Failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Invalid or missing API key (HTTP 401)")]
    Unauthorized,

    #[error("Rate limited by CurseForge API")]
    RateLimited,

    #[error("Server error (HTTP {status})")]
    ServerError { status: u16 },

    #[error("No CurseForge API key configured")]
    MissingApiKey,

    #[error("Invalid search: {0}")]
    InvalidSearch(#[from] SearchRequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TransportError> for CurseForgeError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Http { status: 401, .. } => Self::Unauthorized,
            TransportError::Http { status: 429, .. } => Self::RateLimited,
            TransportError::Http { status, .. } => Self::ServerError { status },
            TransportError::InvalidUrl(url) => Self::InvalidUrl(url),
            TransportError::InvalidResponse => Self::InvalidResponse,
            TransportError::Decoding(e) => Self::Decoding(e),
            TransportError::Encoding(e) => Self::Encoding(e),
            TransportError::Network(e) => Self::Network(e),
        }
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
