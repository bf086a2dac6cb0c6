use craftmeta_core::TransportError;
use serde::Deserialize;

/// Errors returned by [`MojangClient`](crate::MojangClient).
#[derive(Debug, thiserror::Error)]
pub enum MojangError {
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

    #[error("Server error (HTTP {status})")]
    ServerError { status: u16 },

    #[error("API error at '{path}': {message}")]
    Api { path: String, message: String },

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Version not found: {0}")]
    VersionNotFound(String),

    #[error("Player name must not be empty")]
    EmptyPlayerName,

    #[error("UUID must not be empty")]
    EmptyUuid,

    #[error("Not a valid UUID: {0}")]
    InvalidUuid(String),

    #[error("Player has no skin")]
    NoSkinAvailable,

    #[error("Player has no cape")]
    NoCapeAvailable,

    #[error("Texture download failed (HTTP {status})")]
    TextureDownloadFailed { status: u16 },

    #[error("Invalid textures payload: {0}")]
    TexturePayload(String),
}

/// The JSON body Mojang services send alongside a failing status.
///
/// Every field is optional; the services are inconsistent about which ones
/// they fill in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ErrorEnvelope {
    pub fn message(&self) -> &str {
        self.error_message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or("Unknown error")
    }
}

const INVALID_UUID_MARKER: &str = "Not a valid UUID";

impl MojangError {
    pub fn texture_payload(msg: impl Into<String>) -> Self {
        Self::TexturePayload(msg.into())
    }

    /// Turn a failed HTTP response into a domain error.
    ///
    /// A decodable error envelope always wins. `not_found` is only used for a
    /// 404 whose body isn't an envelope.
    pub fn from_response(status: u16, body: &[u8], not_found: Option<MojangError>) -> Self {
        if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
            return Self::from_envelope(envelope);
        }
        match (status, not_found) {
            (404, Some(err)) => err,
            _ => Self::ServerError { status },
        }
    }

    fn from_envelope(envelope: ErrorEnvelope) -> Self {
        let message = envelope.message();

        if message.contains(INVALID_UUID_MARKER) {
            let value = message.rsplit(": ").next().unwrap_or(message);
            return Self::InvalidUuid(value.to_string());
        }

        // Looking up a profile with nothing after the trailing slash.
        if envelope.error.as_deref() == Some("NOT_FOUND")
            && envelope.path.as_deref().is_some_and(|p| p.ends_with("/profile/"))
        {
            return Self::EmptyUuid;
        }

        Self::Api {
            message: message.to_string(),
            path: envelope.path.unwrap_or_default(),
        }
    }

    /// Map a transport failure, consulting the body of HTTP errors.
    pub fn from_transport(err: TransportError, not_found: Option<MojangError>) -> Self {
        match err {
            TransportError::Http { status, body } => Self::from_response(status, &body, not_found),
            TransportError::InvalidUrl(url) => Self::InvalidUrl(url),
            TransportError::InvalidResponse => Self::InvalidResponse,
            TransportError::Decoding(e) => Self::Decoding(e),
            TransportError::Encoding(e) => Self::Encoding(e),
            TransportError::Network(e) => Self::Network(e),
        }
    }
}

impl From<TransportError> for MojangError {
    fn from(err: TransportError) -> Self {
        Self::from_transport(err, None)
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
