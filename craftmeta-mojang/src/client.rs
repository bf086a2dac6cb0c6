use std::collections::HashMap;

use craftmeta_core::{
    BatchResolver, DEFAULT_CHUNK_SIZE, Executor, HeaderMap, TransportError, Url, decode_json,
    parse_url, url_with_segments,
};
use serde::de::DeserializeOwned;

use crate::config::MojangConfig;
use crate::error::MojangError;
use crate::models::{
    LatestVersions, ManifestFormat, PlayerProfile, PlayerUuid, TexturesPayload, VersionDetails,
    VersionInfo, VersionManifest, VersionType,
};

const TEXTURE_HOST_HTTP: &str = "http://textures.minecraft.net";

/// Client for the Mojang version, profile and session services.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct MojangClient {
    config: MojangConfig,
    executor: Executor,
}

impl MojangClient {
    pub fn new(config: MojangConfig) -> Result<Self, MojangError> {
        let executor = Executor::new(&config.transport)?;
        Ok(Self { config, executor })
    }

    pub fn config(&self) -> &MojangConfig {
        &self.config
    }

    // -- Versions --

    /// Fetch the v2 version manifest.
    pub async fn fetch_version_manifest(&self) -> Result<VersionManifest, MojangError> {
        self.fetch_version_manifest_with(ManifestFormat::V2).await
    }

    pub async fn fetch_version_manifest_with(
        &self,
        format: ManifestFormat,
    ) -> Result<VersionManifest, MojangError> {
        let url = url_with_segments(
            &self.config.version_base_url,
            &["mc", "game", format.file_name()],
        )?;
        self.get(url, None).await
    }

    pub async fn fetch_versions(
        &self,
        version_type: VersionType,
    ) -> Result<Vec<VersionInfo>, MojangError> {
        let manifest = self.fetch_version_manifest().await?;
        Ok(manifest
            .versions
            .into_iter()
            .filter(|v| v.version_type == version_type)
            .collect())
    }

    pub async fn fetch_latest_versions(&self) -> Result<LatestVersions, MojangError> {
        Ok(self.fetch_version_manifest().await?.latest)
    }

    pub async fn find_version(&self, id: &str) -> Result<Option<VersionInfo>, MojangError> {
        let manifest = self.fetch_version_manifest().await?;
        Ok(manifest.versions.into_iter().find(|v| v.id == id))
    }

    /// Look `id` up in the manifest, then fetch its details document.
    pub async fn fetch_version_details(&self, id: &str) -> Result<VersionDetails, MojangError> {
        let info = self
            .find_version(id)
            .await?
            .ok_or_else(|| MojangError::VersionNotFound(id.to_string()))?;
        self.fetch_version_details_for(&info).await
    }

    pub async fn fetch_version_details_for(
        &self,
        info: &VersionInfo,
    ) -> Result<VersionDetails, MojangError> {
        let url = parse_url(&info.url)?;
        self.get(url, None).await
    }

    // -- Players --

    pub async fn fetch_player_uuid(&self, name: &str) -> Result<PlayerUuid, MojangError> {
        let name = require_name(name)?;
        let url = url_with_segments(
            &self.config.api_base_url,
            &["users", "profiles", "minecraft", name],
        )?;
        self.get(url, Some(MojangError::PlayerNotFound(name.to_string())))
            .await
    }

    /// Profile lookup by name. The result carries no properties.
    pub async fn fetch_player_profile_by_name(
        &self,
        name: &str,
    ) -> Result<PlayerProfile, MojangError> {
        let name = require_name(name)?;
        let url = url_with_segments(
            &self.config.services_base_url,
            &["minecraft", "profile", "lookup", "name", name],
        )?;
        self.get(url, Some(MojangError::PlayerNotFound(name.to_string())))
            .await
    }

    /// Full profile, including the textures property, from the session server.
    pub async fn fetch_player_profile(
        &self,
        uuid: &str,
        unsigned: bool,
    ) -> Result<PlayerProfile, MojangError> {
        let uuid = require_uuid(uuid)?;
        let mut url = url_with_segments(
            &self.config.session_server_base_url,
            &["session", "minecraft", "profile", uuid],
        )?;
        url.query_pairs_mut()
            .append_pair("unsigned", if unsigned { "true" } else { "false" });
        self.get(url, Some(MojangError::PlayerNotFound(uuid.to_string())))
            .await
    }

    /// Resolve `name` to an id, then fetch the full profile for that id.
    pub async fn fetch_full_profile_by_name(
        &self,
        name: &str,
    ) -> Result<PlayerProfile, MojangError> {
        let summary = self.fetch_player_uuid(name).await?;
        log::debug!("Resolved {} to {}", summary.name, summary.id);
        self.fetch_player_profile(&summary.id, false).await
    }

    pub async fn fetch_username(&self, uuid: &str) -> Result<String, MojangError> {
        let clean = uuid.replace('-', "");
        Ok(self.fetch_player_profile(&clean, false).await?.name)
    }

    /// Resolve player names to undashed ids, ten names per request.
    ///
    /// Names that don't exist are missing from the map. Keys are the names as
    /// submitted (trimmed), whatever casing the service returns.
    pub async fn fetch_uuids<I, S>(&self, names: I) -> Result<HashMap<String, String>, MojangError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.fetch_uuids_chunked(names, DEFAULT_CHUNK_SIZE).await
    }

    pub async fn fetch_uuids_chunked<I, S>(
        &self,
        names: I,
        chunk_size: usize,
    ) -> Result<HashMap<String, String>, MojangError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.fetch_uuids_with(names, BatchResolver::new(chunk_size))
            .await
    }

    pub async fn fetch_uuids_with<I, S>(
        &self,
        names: I,
        resolver: BatchResolver,
    ) -> Result<HashMap<String, String>, MojangError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let url = url_with_segments(&self.config.api_base_url, &["profiles", "minecraft"])?;
        resolver
            .resolve(names, |chunk| self.lookup_uuid_chunk(url.clone(), chunk))
            .await
    }

    async fn lookup_uuid_chunk(
        &self,
        url: Url,
        chunk: Vec<String>,
    ) -> Result<Vec<(String, String)>, MojangError> {
        let body = self
            .executor
            .post_json(url, &chunk, &HeaderMap::new())
            .await?;
        let found: Vec<PlayerUuid> = decode_json(&body)?;

        // Every spelling submitted for a player gets the id, not just the first.
        Ok(found
            .into_iter()
            .flat_map(|player| {
                let mut keys: Vec<String> = chunk
                    .iter()
                    .filter(|submitted| submitted.eq_ignore_ascii_case(&player.name))
                    .cloned()
                    .collect();
                if keys.is_empty() {
                    keys.push(player.name);
                }
                keys.into_iter().map(move |key| (key, player.id.clone()))
            })
            .collect())
    }

    /// SHA1 hashes of server addresses blocked by Mojang, one per line.
    pub async fn fetch_blocked_servers(&self) -> Result<Vec<String>, MojangError> {
        let url = url_with_segments(&self.config.session_server_base_url, &["blockedservers"])?;
        let body = self
            .executor
            .get_bytes(url, &HeaderMap::new())
            .await
            .map_err(|e| MojangError::from_transport(e, None))?;

        Ok(String::from_utf8_lossy(&body)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    // -- Textures --

    pub async fn fetch_textures_by_uuid(&self, uuid: &str) -> Result<TexturesPayload, MojangError> {
        self.fetch_player_profile(uuid, false)
            .await?
            .textures_payload()
    }

    pub async fn fetch_textures_by_name(&self, name: &str) -> Result<TexturesPayload, MojangError> {
        self.fetch_full_profile_by_name(name)
            .await?
            .textures_payload()
    }

    pub async fn fetch_skin_url_by_uuid(&self, uuid: &str) -> Result<Option<String>, MojangError> {
        Ok(self.fetch_player_profile(uuid, false).await?.skin_url())
    }

    pub async fn fetch_skin_url_by_name(&self, name: &str) -> Result<Option<String>, MojangError> {
        Ok(self.fetch_full_profile_by_name(name).await?.skin_url())
    }

    pub async fn fetch_cape_url_by_uuid(&self, uuid: &str) -> Result<Option<String>, MojangError> {
        Ok(self.fetch_player_profile(uuid, false).await?.cape_url())
    }

    pub async fn fetch_cape_url_by_name(&self, name: &str) -> Result<Option<String>, MojangError> {
        Ok(self.fetch_full_profile_by_name(name).await?.cape_url())
    }

    /// Download the skin PNG for `uuid`.
    pub async fn download_skin_by_uuid(&self, uuid: &str) -> Result<Vec<u8>, MojangError> {
        let url = self
            .fetch_skin_url_by_uuid(uuid)
            .await?
            .ok_or(MojangError::NoSkinAvailable)?;
        self.download_texture(&url).await
    }

    pub async fn download_skin_by_name(&self, name: &str) -> Result<Vec<u8>, MojangError> {
        let url = self
            .fetch_skin_url_by_name(name)
            .await?
            .ok_or(MojangError::NoSkinAvailable)?;
        self.download_texture(&url).await
    }

    pub async fn download_cape_by_uuid(&self, uuid: &str) -> Result<Vec<u8>, MojangError> {
        let url = self
            .fetch_cape_url_by_uuid(uuid)
            .await?
            .ok_or(MojangError::NoCapeAvailable)?;
        self.download_texture(&url).await
    }

    pub async fn download_cape_by_name(&self, name: &str) -> Result<Vec<u8>, MojangError> {
        let url = self
            .fetch_cape_url_by_name(name)
            .await?
            .ok_or(MojangError::NoCapeAvailable)?;
        self.download_texture(&url).await
    }

    async fn download_texture(&self, raw_url: &str) -> Result<Vec<u8>, MojangError> {
        let url = parse_url(&secure_texture_url(raw_url))?;
        log::debug!("Downloading texture {}", url);
        self.executor
            .get_bytes(url, &HeaderMap::new())
            .await
            .map_err(|e| match e {
                TransportError::Http { status, .. } => MojangError::TextureDownloadFailed { status },
                other => MojangError::from(other),
            })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        not_found: Option<MojangError>,
    ) -> Result<T, MojangError> {
        self.executor
            .get_json(url, &HeaderMap::new())
            .await
            .map_err(|e| MojangError::from_transport(e, not_found))
    }
}

/// Texture URLs in profile payloads use plain http; the host serves https.
pub fn secure_texture_url(raw: &str) -> String {
    match raw.strip_prefix(TEXTURE_HOST_HTTP) {
        Some(rest) => format!("https://textures.minecraft.net{}", rest),
        None => raw.to_string(),
    }
}

fn require_name(name: &str) -> Result<&str, MojangError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MojangError::EmptyPlayerName);
    }
    Ok(name)
}

fn require_uuid(uuid: &str) -> Result<&str, MojangError> {
    let uuid = uuid.trim();
    if uuid.is_empty() {
        return Err(MojangError::EmptyUuid);
    }
    Ok(uuid)
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
