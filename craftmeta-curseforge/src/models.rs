use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;
use crate::search::ClassId;

/// Response of `GET /mods/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModsSearchResponse {
    pub data: Vec<Mod>,
    pub pagination: Pagination,
}

impl ModsSearchResponse {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Response of `GET /mods/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModResponse {
    pub data: Mod,
}

/// A project on CurseForge: a mod, modpack, resource pack and so on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mod {
    pub id: u64,
    pub game_id: u32,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub links: ModLinks,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub status: u32,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub primary_category_id: Option<u32>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub class_id: Option<u32>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub logo: Option<ModAsset>,
    #[serde(default)]
    pub screenshots: Option<Vec<ModAsset>>,
    #[serde(default)]
    pub main_file_id: Option<u64>,
    #[serde(default)]
    pub latest_files: Vec<ModFile>,
    #[serde(default)]
    pub latest_files_indexes: Vec<FileIndex>,
    #[serde(with = "craftmeta_core::dates::flexible")]
    pub date_created: DateTime<Utc>,
    #[serde(with = "craftmeta_core::dates::flexible")]
    pub date_modified: DateTime<Utc>,
    #[serde(with = "craftmeta_core::dates::flexible")]
    pub date_released: DateTime<Utc>,
    #[serde(default)]
    pub allow_mod_distribution: Option<bool>,
    #[serde(default)]
    pub game_popularity_rank: Option<u64>,
    #[serde(default)]
    pub is_available: Option<bool>,
    #[serde(default)]
    pub thumbs_up_count: Option<u64>,
    #[serde(default)]
    pub social_links: Option<Vec<SocialLink>>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl Mod {
    pub fn class(&self) -> Option<ClassId> {
        self.class_id.and_then(ClassId::from_id)
    }

    pub fn is_modpack(&self) -> bool {
        self.class() == Some(ClassId::Modpacks)
    }

    /// The newest file flagged as a release.
    pub fn latest_release_file(&self) -> Option<&ModFile> {
        self.latest_files
            .iter()
            .filter(|f| f.release_type == ModFile::RELEASE)
            .max_by_key(|f| f.file_date)
    }

    /// Game versions covered by the latest file indexes, in first-seen order.
    pub fn supported_game_versions(&self) -> Vec<String> {
        let mut versions: Vec<String> = Vec::new();
        for index in &self.latest_files_indexes {
            if !versions.contains(&index.game_version) {
                versions.push(index.game_version.clone());
            }
        }
        versions
    }

    pub fn formatted_download_count(&self) -> String {
        format_count(self.download_count)
    }
}

fn format_count(count: u64) -> String {
    match count {
        0..1_000 => count.to_string(),
        1_000..1_000_000 => format!("{:.1}K", count as f64 / 1_000.0),
        1_000_000..1_000_000_000 => format!("{:.1}M", count as f64 / 1_000_000.0),
        _ => format!("{:.1}B", count as f64 / 1_000_000_000.0),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModLinks {
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub wiki_url: Option<String>,
    #[serde(default)]
    pub issues_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,
    #[serde(default)]
    pub game_id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default, with = "craftmeta_core::dates::flexible::option")]
    pub date_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_class: Option<bool>,
    #[serde(default)]
    pub class_id: Option<u32>,
    #[serde(default)]
    pub parent_category_id: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// A logo or screenshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModAsset {
    pub id: u64,
    pub mod_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(rename = "type")]
    pub link_type: u32,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModFile {
    pub id: u64,
    #[serde(default)]
    pub game_id: Option<u32>,
    pub mod_id: u64,
    #[serde(default)]
    pub is_available: bool,
    pub display_name: String,
    pub file_name: String,
    /// 1 release, 2 beta, 3 alpha.
    pub release_type: u32,
    #[serde(default)]
    pub file_status: u32,
    #[serde(default)]
    pub hashes: Vec<FileHash>,
    #[serde(with = "craftmeta_core::dates::flexible")]
    pub file_date: DateTime<Utc>,
    #[serde(default)]
    pub file_length: u64,
    #[serde(default)]
    pub download_count: u64,
    /// Null when the author has disabled third-party distribution.
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub game_versions: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<FileDependency>,
    #[serde(default)]
    pub modules: Vec<FileModule>,
    #[serde(default)]
    pub file_fingerprint: u64,
    #[serde(default)]
    pub server_pack_file_id: Option<u64>,
}

impl ModFile {
    pub const RELEASE: u32 = 1;
    pub const BETA: u32 = 2;
    pub const ALPHA: u32 = 3;

    pub fn sha1_hash(&self) -> Option<&str> {
        self.hash_for(FileHash::SHA1)
    }

    pub fn md5_hash(&self) -> Option<&str> {
        self.hash_for(FileHash::MD5)
    }

    fn hash_for(&self, algo: u32) -> Option<&str> {
        self.hashes
            .iter()
            .find(|h| h.algo == algo)
            .map(|h| h.value.as_str())
    }

    pub fn release_type_name(&self) -> &'static str {
        match self.release_type {
            Self::RELEASE => "Release",
            Self::BETA => "Beta",
            Self::ALPHA => "Alpha",
            _ => "Unknown",
        }
    }

    pub fn formatted_file_size(&self) -> String {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
        let mut size = self.file_length as f64;
        let mut unit = 0;
        while size >= 1024.0 && unit < UNITS.len() - 1 {
            size /= 1024.0;
            unit += 1;
        }
        if unit == 0 {
            format!("{} B", self.file_length)
        } else {
            format!("{:.2} {}", size, UNITS[unit])
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHash {
    pub value: String,
    /// 1 SHA1, 2 MD5.
    pub algo: u32,
}

impl FileHash {
    pub const SHA1: u32 = 1;
    pub const MD5: u32 = 2;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDependency {
    pub mod_id: u64,
    /// 3 required, 2 optional, 1 embedded, 4 tool, 5 incompatible, 6 include.
    pub relation_type: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileModule {
    pub name: String,
    pub fingerprint: u64,
}

/// Per game-version pointer to the latest file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileIndex {
    pub game_version: String,
    pub file_id: u64,
    pub filename: String,
    pub release_type: u32,
    #[serde(default)]
    pub game_version_type_id: Option<u32>,
    #[serde(default)]
    pub mod_loader: Option<u32>,
}

#[cfg(test)]
#[path = "tests/models_tests.rs"]
mod tests;
