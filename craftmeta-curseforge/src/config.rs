use craftmeta_core::TransportConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.curseforge.com/v1";

/// Settings for a [`CurseForgeClient`](crate::CurseForgeClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurseForgeConfig {
    pub api_key: String,
    pub base_url: String,
    pub transport: TransportConfig,
}

impl CurseForgeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: TransportConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }
}
