//! Typed client for the Mojang version manifest, player profile and session
//! services.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::{MojangClient, secure_texture_url};
pub use config::MojangConfig;
pub use error::{ErrorEnvelope, MojangError};
pub use models::{
    LatestVersions, ManifestFormat, PlayerProfile, PlayerUuid, SkinModel, TexturesPayload,
    VersionDetails, VersionInfo, VersionManifest, VersionType, format_uuid,
};
