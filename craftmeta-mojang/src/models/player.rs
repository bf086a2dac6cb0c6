use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::MojangError;

/// The lightweight name to id record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerUuid {
    pub name: String,
    /// Undashed 32-character hex id.
    pub id: String,
}

impl PlayerUuid {
    pub fn formatted_uuid(&self) -> String {
        format_uuid(&self.id)
    }
}

/// Insert the 8-4-4-4-12 dashes into an undashed id.
///
/// Anything that isn't exactly 32 ASCII characters is returned unchanged.
pub fn format_uuid(id: &str) -> String {
    if id.len() != 32 || !id.is_ascii() {
        return id.to_string();
    }
    format!(
        "{}-{}-{}-{}-{}",
        &id[..8],
        &id[8..12],
        &id[12..16],
        &id[16..20],
        &id[20..]
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub id: String,
    pub name: String,
    /// Only present on session server lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<ProfileProperty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_actions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileProperty {
    pub name: String,
    /// Base64 encoded JSON.
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

const TEXTURES_PROPERTY: &str = "textures";

impl PlayerProfile {
    /// Decode the `textures` property.
    pub fn textures_payload(&self) -> Result<TexturesPayload, MojangError> {
        let property = self
            .properties
            .iter()
            .flatten()
            .find(|p| p.name == TEXTURES_PROPERTY)
            .ok_or_else(|| MojangError::texture_payload("profile has no textures property"))?;

        let raw = STANDARD
            .decode(property.value.trim())
            .map_err(|e| MojangError::texture_payload(format!("invalid base64: {}", e)))?;
        serde_json::from_slice(&raw)
            .map_err(|e| MojangError::texture_payload(format!("invalid JSON: {}", e)))
    }

    pub fn skin_url(&self) -> Option<String> {
        self.textures_payload()
            .ok()
            .and_then(|t| t.textures.skin.map(|s| s.url))
    }

    pub fn cape_url(&self) -> Option<String> {
        self.textures_payload()
            .ok()
            .and_then(|t| t.textures.cape.map(|c| c.url))
    }

    pub fn skin_model(&self) -> Option<SkinModel> {
        self.textures_payload()
            .ok()
            .and_then(|t| t.textures.skin.map(|s| s.skin_model()))
    }

    pub fn has_custom_skin(&self) -> bool {
        self.skin_url().is_some()
    }

    pub fn has_cape(&self) -> bool {
        self.cape_url().is_some()
    }
}

/// The decoded contents of a profile's `textures` property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TexturesPayload {
    /// Milliseconds since the epoch.
    pub timestamp: i64,
    pub profile_id: String,
    pub profile_name: String,
    #[serde(default)]
    pub signature_required: Option<bool>,
    pub textures: Textures,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Textures {
    #[serde(rename = "SKIN", default, skip_serializing_if = "Option::is_none")]
    pub skin: Option<SkinTexture>,
    #[serde(rename = "CAPE", default, skip_serializing_if = "Option::is_none")]
    pub cape: Option<CapeTexture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinTexture {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SkinMetadata>,
}

impl SkinTexture {
    /// Skins without metadata use the classic (Steve) model.
    pub fn skin_model(&self) -> SkinModel {
        match self.metadata.as_ref().and_then(|m| m.model.as_deref()) {
            Some("slim") => SkinModel::Slim,
            _ => SkinModel::Classic,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinMetadata {
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapeTexture {
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinModel {
    Classic,
    Slim,
}

impl std::fmt::Display for SkinModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkinModel::Classic => write!(f, "classic"),
            SkinModel::Slim => write!(f, "slim"),
        }
    }
}
