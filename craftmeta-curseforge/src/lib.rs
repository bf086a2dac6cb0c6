//! Typed client for the CurseForge catalog API, restricted to Minecraft
//! content.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod pagination;
pub mod search;

pub use client::CurseForgeClient;
pub use config::{CurseForgeConfig, DEFAULT_BASE_URL};
pub use credentials::{API_KEY_ENV, ApiKey, CredentialSource};
pub use error::CurseForgeError;
pub use models::{
    Author, Category, FileDependency, FileHash, FileIndex, FileModule, Mod, ModAsset, ModFile,
    ModLinks, ModResponse, ModsSearchResponse, SocialLink,
};
pub use pagination::Pagination;
pub use search::{
    ClassId, DEFAULT_PAGE_SIZE, GameId, MAX_PAGE_SIZE, ModLoader, SearchRequest,
    SearchRequestError, SortField, SortOrder,
};
