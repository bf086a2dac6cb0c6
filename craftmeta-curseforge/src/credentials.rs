use std::path::{Path, PathBuf};

use crate::error::CurseForgeError;

pub const API_KEY_ENV: &str = "CURSEFORGE_API_KEY";

/// Where the API key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// A resolved CurseForge API key and its provenance.
#[derive(Clone)]
pub struct ApiKey {
    pub key: String,
    pub source: CredentialSource,
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("key", &mask(&self.key))
            .field("source", &self.source)
            .finish()
    }
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize)]
struct ConfigFile {
    curseforge: Option<CurseForgeSection>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct CurseForgeSection {
    api_key: Option<String>,
}

impl ApiKey {
    /// Resolve the key from `$CURSEFORGE_API_KEY`, then the config file.
    pub fn load() -> Result<Self, CurseForgeError> {
        let env_value = std::env::var(API_KEY_ENV).ok();
        let path = config_path();
        Self::load_from(env_value, path.as_deref())
    }

    /// Same resolution as [`ApiKey::load`] with the inputs passed in.
    ///
    /// Blank values count as unset.
    pub fn load_from(env_value: Option<String>, path: Option<&Path>) -> Result<Self, CurseForgeError> {
        if let Some(key) = env_value.and_then(non_blank) {
            return Ok(Self {
                key,
                source: CredentialSource::EnvVar(API_KEY_ENV),
            });
        }

        if let Some(key) = path.and_then(read_key).and_then(non_blank) {
            return Ok(Self {
                key,
                source: CredentialSource::ConfigFile,
            });
        }

        Err(CurseForgeError::MissingApiKey)
    }

    /// The key with everything but the last four characters hidden.
    pub fn masked(&self) -> String {
        mask(&self.key)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

/// Return the path to the credentials config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("craftmeta").join("credentials.toml"))
}

/// Save the API key to the config file, creating parent directories as needed.
///
/// Returns the path the file was written to.
pub fn save_to_file(key: &str) -> Result<PathBuf, CurseForgeError> {
    let path = config_path().ok_or_else(|| {
        CurseForgeError::Config("Could not determine config directory".to_string())
    })?;
    save_to_path(key, &path)?;
    Ok(path)
}

/// Write `key` into the `[curseforge]` section of the file at `path`.
///
/// Other sections already in the file are kept.
pub fn save_to_path(key: &str, path: &Path) -> Result<(), CurseForgeError> {
    let key = non_blank(key.to_string()).ok_or(CurseForgeError::MissingApiKey)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut table = match std::fs::read_to_string(path) {
        Ok(content) => content
            .parse::<toml::Table>()
            .map_err(|e| CurseForgeError::Config(format!("Failed to parse {}: {}", path.display(), e)))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
        Err(e) => return Err(e.into()),
    };

    let section = table
        .entry("curseforge")
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    match section {
        toml::Value::Table(section) => {
            section.insert("api_key".to_string(), toml::Value::String(key));
        }
        other => {
            *other = toml::Value::Table(toml::Table::from_iter([(
                "api_key".to_string(),
                toml::Value::String(key),
            )]));
        }
    }

    let toml_str = toml::to_string_pretty(&table)
        .map_err(|e| CurseForgeError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, toml_str)?;
    log::debug!("Wrote API key to {}", path.display());
    Ok(())
}

fn read_key(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let config: ConfigFile = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring unreadable {}: {}", path.display(), e);
            return None;
        }
    };
    config.curseforge?.api_key
}

#[cfg(test)]
#[path = "tests/credentials_tests.rs"]
mod tests;
