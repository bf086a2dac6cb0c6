use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Cache behaviour requested from the HTTP layer.
///
/// The client keeps no cache of its own; this only controls the request
/// headers that intermediaries and the server see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Let the protocol decide (no extra headers).
    #[default]
    UseProtocol,
    /// Ask every hop to revalidate (`Cache-Control: no-cache`).
    ReloadIgnoringCache,
}

/// Settings shared by every request a client issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub cache_policy: CachePolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            cache_policy: CachePolicy::default(),
        }
    }
}
