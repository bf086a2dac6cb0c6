//! Shared request/response plumbing for the craftmeta service clients.
//!
//! Nothing in here knows about a particular backend. The domain crates build
//! URLs and headers, hand them to an [`Executor`], and translate the
//! [`TransportError`]s they get back into their own error types.

pub mod batch;
pub mod config;
pub mod dates;
pub mod error;
pub mod transport;

pub use batch::{BatchResolver, DEFAULT_CHUNK_SIZE, chunked, normalize_keys};
pub use config::{CachePolicy, DEFAULT_TIMEOUT, TransportConfig};
pub use dates::{DateParseError, DateStrategy};
pub use error::TransportError;
pub use transport::{Executor, decode_json, parse_url, url_with_segments, validate_response};

pub use reqwest::Url;
pub use reqwest::header::{HeaderMap, HeaderValue};
