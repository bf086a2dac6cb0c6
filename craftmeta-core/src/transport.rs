//! The HTTP request executor shared by every backend client.
//!
//! An [`Executor`] issues exactly one request per call, checks the status
//! code, and hands back either a decoded value or the raw body. It knows
//! nothing about the services it talks to: URLs and headers come from the
//! caller, and failures are reported as [`TransportError`]s for the caller to
//! translate.

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{CachePolicy, TransportConfig};
use crate::error::TransportError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Executes requests against a single pooled HTTP client.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Executor {
    http: reqwest::Client,
    cache_policy: CachePolicy,
}

impl Executor {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            cache_policy: config.cache_policy,
        })
    }

    /// GET `url` and decode the JSON body into `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        headers: &HeaderMap,
    ) -> Result<T, TransportError> {
        log::debug!("GET {}", url);
        let body = self.execute(self.request(Method::GET, url, headers)).await?;
        decode_json(&body)
    }

    /// GET `url` and return the body untouched (images, plain text).
    pub async fn get_bytes(
        &self,
        url: Url,
        headers: &HeaderMap,
    ) -> Result<Vec<u8>, TransportError> {
        log::debug!("GET {} (raw)", url);
        self.execute(self.request(Method::GET, url, headers)).await
    }

    /// POST `body` as JSON and return the raw response body.
    ///
    /// Decoding is left to the caller (see [`decode_json`]) since batch
    /// endpoints answer with shapes that need post-processing.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
        headers: &HeaderMap,
    ) -> Result<Vec<u8>, TransportError> {
        log::debug!("POST {}", url);
        let builder = self
            .request(Method::POST, url, headers)
            .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(serde_json::to_vec(body).map_err(TransportError::Encoding)?);
        self.execute(builder).await
    }

    fn request(&self, method: Method, url: Url, headers: &HeaderMap) -> RequestBuilder {
        let builder = self.http.request(method, url).headers(headers.clone());
        match self.cache_policy {
            CachePolicy::UseProtocol => builder,
            CachePolicy::ReloadIgnoringCache => {
                builder.header(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            }
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Vec<u8>, TransportError> {
        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();

        let result = validate_response(status, body);
        if let Err(e) = &result {
            log::debug!("Request failed: {}", e);
        }
        result
    }
}

/// Check a response status, passing the body through on success.
///
/// Anything outside the range of final HTTP statuses is unusable; any
/// non-2xx status is an HTTP error that keeps its body for diagnostics.
pub fn validate_response(status: u16, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
    if !(100..=599).contains(&status) {
        return Err(TransportError::InvalidResponse);
    }
    if !(200..=299).contains(&status) {
        return Err(TransportError::Http { status, body });
    }
    Ok(body)
}

pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, TransportError> {
    serde_json::from_slice(body).map_err(TransportError::Decoding)
}

pub fn parse_url(raw: &str) -> Result<Url, TransportError> {
    Url::parse(raw).map_err(|e| TransportError::invalid_url(format!("{}: {}", raw, e)))
}

/// Append path segments to `base`, percent-encoding each one.
///
/// A `/` inside a segment is encoded rather than treated as a separator, so
/// user-supplied identifiers can't change the endpoint. `.` and `..` would be
/// dropped by path normalization and are rejected instead.
pub fn url_with_segments(base: &str, segments: &[&str]) -> Result<Url, TransportError> {
    if let Some(dots) = segments.iter().find(|s| matches!(**s, "." | "..")) {
        return Err(TransportError::invalid_url(format!(
            "'{}' is not a valid path segment",
            dots
        )));
    }
    let mut url = parse_url(base)?;
    url.path_segments_mut()
        .map_err(|_| TransportError::invalid_url(format!("{} cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
