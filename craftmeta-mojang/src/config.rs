use craftmeta_core::TransportConfig;

pub const DEFAULT_VERSION_BASE_URL: &str = "https://piston-meta.mojang.com";
pub const DEFAULT_API_BASE_URL: &str = "https://api.mojang.com";
pub const DEFAULT_SERVICES_BASE_URL: &str = "https://api.minecraftservices.com";
pub const DEFAULT_SESSION_SERVER_BASE_URL: &str = "https://sessionserver.mojang.com";

/// Endpoints and transport settings for a [`MojangClient`](crate::MojangClient).
///
/// Each Mojang service lives on its own host. Tests point all four at a
/// single mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MojangConfig {
    /// Version manifest and per-version metadata.
    pub version_base_url: String,
    /// Name to id lookups and the bulk id endpoint.
    pub api_base_url: String,
    /// Profile lookups by name.
    pub services_base_url: String,
    /// Full profiles with textures, and the blocked server list.
    pub session_server_base_url: String,
    pub transport: TransportConfig,
}

impl Default for MojangConfig {
    fn default() -> Self {
        Self {
            version_base_url: DEFAULT_VERSION_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            services_base_url: DEFAULT_SERVICES_BASE_URL.to_string(),
            session_server_base_url: DEFAULT_SESSION_SERVER_BASE_URL.to_string(),
            transport: TransportConfig::default(),
        }
    }
}

impl MojangConfig {
    /// Route every service to the same base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            version_base_url: base_url.clone(),
            api_base_url: base_url.clone(),
            services_base_url: base_url.clone(),
            session_server_base_url: base_url,
            transport: TransportConfig::default(),
        }
    }
}
