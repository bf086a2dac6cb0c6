use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which manifest document to fetch.
///
/// Both list the same versions; v2 additionally carries a SHA1 and
/// compliance level per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifestFormat {
    V1,
    #[default]
    V2,
}

impl ManifestFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            ManifestFormat::V1 => "version_manifest.json",
            ManifestFormat::V2 => "version_manifest_v2.json",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionManifest {
    pub latest: LatestVersions,
    pub versions: Vec<VersionInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestVersions {
    pub release: String,
    pub snapshot: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionType {
    Release,
    Snapshot,
    OldBeta,
    OldAlpha,
}

impl VersionType {
    pub fn as_str(self) -> &'static str {
        match self {
            VersionType::Release => "release",
            VersionType::Snapshot => "snapshot",
            VersionType::OldBeta => "old_beta",
            VersionType::OldAlpha => "old_alpha",
        }
    }
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "release" => Ok(VersionType::Release),
            "snapshot" => Ok(VersionType::Snapshot),
            "old_beta" | "beta" => Ok(VersionType::OldBeta),
            "old_alpha" | "alpha" => Ok(VersionType::OldAlpha),
            other => Err(format!("unknown version type '{}'", other)),
        }
    }
}

/// One entry of the version manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub version_type: VersionType,
    /// Where the full [`VersionDetails`] document lives.
    pub url: String,
    #[serde(with = "craftmeta_core::dates::iso8601")]
    pub time: DateTime<Utc>,
    #[serde(with = "craftmeta_core::dates::iso8601")]
    pub release_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_level: Option<u32>,
}

impl VersionInfo {
    pub fn has_sha1(&self) -> bool {
        self.sha1.is_some()
    }

    pub fn has_compliance_level(&self) -> bool {
        self.compliance_level.is_some()
    }

    /// Whether this entry came from the v2 manifest.
    pub fn is_from_v2_api(&self) -> bool {
        self.has_sha1() && self.has_compliance_level()
    }

    pub fn formatted_release_date(&self) -> String {
        self.release_time.format("%Y-%m-%d").to_string()
    }
}

impl PartialEq for VersionInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for VersionInfo {}

/// The per-version metadata document a launcher needs to run a version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDetails {
    pub id: String,
    #[serde(rename = "type")]
    pub version_type: VersionType,
    pub main_class: String,
    #[serde(with = "craftmeta_core::dates::iso8601")]
    pub time: DateTime<Utc>,
    #[serde(with = "craftmeta_core::dates::iso8601")]
    pub release_time: DateTime<Utc>,
    /// Structured launch arguments (1.13 and later).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Arguments>,
    /// Space-separated launch arguments (before 1.13).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minecraft_arguments: Option<String>,
    pub asset_index: AssetIndex,
    pub assets: String,
    #[serde(default)]
    pub compliance_level: Option<u32>,
    pub downloads: Downloads,
    /// Absent on very old versions, which all run on Java 8.
    #[serde(default)]
    pub java_version: JavaVersion,
    #[serde(default)]
    pub libraries: Vec<Library>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<Logging>,
    #[serde(default)]
    pub minimum_launcher_version: Option<u32>,
}

impl VersionDetails {
    pub fn uses_structured_arguments(&self) -> bool {
        self.arguments.is_some()
    }

    pub fn uses_legacy_arguments(&self) -> bool {
        self.arguments.is_none() && self.minecraft_arguments.is_some()
    }

    /// Game arguments that apply unconditionally.
    pub fn game_argument_strings(&self) -> Vec<String> {
        match (&self.arguments, &self.minecraft_arguments) {
            (Some(args), _) => plain_arguments(&args.game),
            (None, Some(legacy)) => legacy.split_whitespace().map(str::to_string).collect(),
            (None, None) => Vec::new(),
        }
    }

    /// JVM arguments that apply unconditionally. Legacy versions have none.
    pub fn jvm_argument_strings(&self) -> Vec<String> {
        self.arguments
            .as_ref()
            .map(|args| plain_arguments(&args.jvm))
            .unwrap_or_default()
    }

    pub fn client_download_url(&self) -> &str {
        &self.downloads.client.url
    }

    pub fn asset_index_url(&self) -> &str {
        &self.asset_index.url
    }

    /// Client jar plus every library artifact, in bytes.
    pub fn total_download_size(&self) -> u64 {
        let libraries: u64 = self
            .libraries
            .iter()
            .filter_map(|lib| lib.downloads.as_ref())
            .filter_map(|d| d.artifact.as_ref())
            .map(|a| a.size)
            .sum();
        self.downloads.client.size + libraries
    }

    pub fn formatted_download_size(&self) -> String {
        format_bytes(self.total_download_size())
    }

    /// Libraries whose rules allow them on `os` ("windows", "osx", "linux").
    pub fn libraries_for(&self, os: &str) -> Vec<&Library> {
        self.libraries.iter().filter(|lib| lib.applies_to(os)).collect()
    }
}

fn plain_arguments(args: &[Argument]) -> Vec<String> {
    args.iter()
        .filter_map(|arg| match arg {
            Argument::Plain(s) => Some(s.clone()),
            Argument::Conditional { .. } => None,
        })
        .collect()
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Arguments {
    #[serde(default)]
    pub game: Vec<Argument>,
    #[serde(default)]
    pub jvm: Vec<Argument>,
}

/// A launch argument: either always passed, or gated on rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Plain(String),
    Conditional {
        rules: Vec<Rule>,
        value: ArgumentValue,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentValue {
    Single(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Disallow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub action: RuleAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<OsRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<HashMap<String, bool>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OsRule {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub arch: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIndex {
    pub id: String,
    pub sha1: String,
    pub size: u64,
    pub total_size: u64,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Downloads {
    pub client: DownloadInfo,
    #[serde(default)]
    pub client_mappings: Option<DownloadInfo>,
    #[serde(default)]
    pub server: Option<DownloadInfo>,
    #[serde(default)]
    pub server_mappings: Option<DownloadInfo>,
    #[serde(default)]
    pub windows_server: Option<DownloadInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadInfo {
    pub sha1: String,
    pub size: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaVersion {
    pub component: String,
    pub major_version: u32,
}

impl Default for JavaVersion {
    fn default() -> Self {
        Self {
            component: "jre-legacy".to_string(),
            major_version: 8,
        }
    }
}

impl JavaVersion {
    pub fn is_java8(&self) -> bool {
        self.major_version == 8
    }

    pub fn is_java17_plus(&self) -> bool {
        self.major_version >= 17
    }

    pub fn is_java21_plus(&self) -> bool {
        self.major_version >= 21
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Library {
    /// Maven coordinates, `group:artifact:version[:classifier]`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<LibraryDownloads>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natives: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Library {
    /// `group:artifact` without the version.
    pub fn short_name(&self) -> String {
        let mut parts = self.name.split(':');
        match (parts.next(), parts.next()) {
            (Some(group), Some(artifact)) => format!("{}:{}", group, artifact),
            _ => self.name.clone(),
        }
    }

    pub fn version(&self) -> Option<&str> {
        self.name.split(':').nth(2)
    }

    /// Evaluate the OS rules for `os`. Feature-gated rules never match.
    ///
    /// With no rules a library applies everywhere. Otherwise the last
    /// matching rule decides, and nothing matching means disallowed.
    pub fn applies_to(&self, os: &str) -> bool {
        let Some(rules) = &self.rules else {
            return true;
        };

        let mut allowed = false;
        for rule in rules {
            if rule.features.is_some() {
                continue;
            }
            let matches = rule
                .os
                .as_ref()
                .and_then(|o| o.name.as_deref())
                .is_none_or(|name| name == os);
            if matches {
                allowed = rule.action == RuleAction::Allow;
            }
        }
        allowed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryDownloads {
    #[serde(default)]
    pub artifact: Option<LibraryArtifact>,
    #[serde(default)]
    pub classifiers: Option<HashMap<String, LibraryArtifact>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryArtifact {
    #[serde(default)]
    pub path: Option<String>,
    pub sha1: String,
    pub size: u64,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    #[serde(default)]
    pub client: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub argument: String,
    pub file: LoggingFile,
    #[serde(rename = "type")]
    pub config_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingFile {
    pub id: String,
    pub sha1: String,
    pub size: u64,
    pub url: String,
}
