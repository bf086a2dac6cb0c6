/// Errors raised by the transport layer.
///
/// These never reach callers of the domain clients directly; each client maps
/// them into its own error type.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with something that is not a usable HTTP status.
    #[error("Invalid response from server")]
    InvalidResponse,

    #[error("HTTP error {status}")]
    Http { status: u16, body: Vec<u8> },

    #[error("Failed to decode response: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("Failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl TransportError {
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    /// The HTTP status, if this is an HTTP error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The raw body of a failed HTTP response, as lossy UTF-8.
    pub fn body_text(&self) -> Option<String> {
        match self {
            Self::Http { body, .. } => Some(String::from_utf8_lossy(body).into_owned()),
            _ => None,
        }
    }
}
