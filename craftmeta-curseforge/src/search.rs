//! Search queries for the `/mods/search` endpoint.
//!
//! A [`SearchRequest`] is a plain value. Every builder method leaves the
//! receiver untouched and returns a new request with one field changed, so a
//! partially built request can be reused as a template. Range checks only
//! happen in [`SearchRequest::validate`].

use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: i64 = 25;
pub const MAX_PAGE_SIZE: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameId {
    #[default]
    Minecraft,
}

impl GameId {
    pub fn id(self) -> u32 {
        match self {
            GameId::Minecraft => 432,
        }
    }
}

/// Top-level content classes for Minecraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassId {
    Mods,
    Modpacks,
    ResourcePacks,
    Worlds,
    BukkitPlugins,
    Customization,
    Addons,
    Shaders,
    DataPacks,
}

impl ClassId {
    pub const ALL: [ClassId; 9] = [
        ClassId::Mods,
        ClassId::Modpacks,
        ClassId::ResourcePacks,
        ClassId::Worlds,
        ClassId::BukkitPlugins,
        ClassId::Customization,
        ClassId::Addons,
        ClassId::Shaders,
        ClassId::DataPacks,
    ];

    pub fn id(self) -> u32 {
        match self {
            ClassId::Mods => 6,
            ClassId::Modpacks => 4471,
            ClassId::ResourcePacks => 12,
            ClassId::Worlds => 17,
            ClassId::BukkitPlugins => 5,
            ClassId::Customization => 4546,
            ClassId::Addons => 4559,
            ClassId::Shaders => 6552,
            ClassId::DataPacks => 6945,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn slug(self) -> &'static str {
        match self {
            ClassId::Mods => "mods",
            ClassId::Modpacks => "modpacks",
            ClassId::ResourcePacks => "resource-packs",
            ClassId::Worlds => "worlds",
            ClassId::BukkitPlugins => "bukkit-plugins",
            ClassId::Customization => "customization",
            ClassId::Addons => "addons",
            ClassId::Shaders => "shaders",
            ClassId::DataPacks => "data-packs",
        }
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ClassId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == wanted || c.slug().trim_end_matches('s') == wanted)
            .ok_or_else(|| format!("unknown class '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Featured,
    Popularity,
    LastUpdated,
    Name,
    Author,
    TotalDownloads,
    Category,
    GameVersion,
    EarlyAccess,
    FeaturedReleased,
    ReleasedDate,
    Rating,
}

impl SortField {
    pub fn id(self) -> u32 {
        match self {
            SortField::Featured => 1,
            SortField::Popularity => 2,
            SortField::LastUpdated => 3,
            SortField::Name => 4,
            SortField::Author => 5,
            SortField::TotalDownloads => 6,
            SortField::Category => 7,
            SortField::GameVersion => 8,
            SortField::EarlyAccess => 9,
            SortField::FeaturedReleased => 10,
            SortField::ReleasedDate => 11,
            SortField::Rating => 12,
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "featured" => Ok(SortField::Featured),
            "popularity" => Ok(SortField::Popularity),
            "lastupdated" | "updated" => Ok(SortField::LastUpdated),
            "name" => Ok(SortField::Name),
            "author" => Ok(SortField::Author),
            "totaldownloads" | "downloads" => Ok(SortField::TotalDownloads),
            "category" => Ok(SortField::Category),
            "gameversion" => Ok(SortField::GameVersion),
            "earlyaccess" => Ok(SortField::EarlyAccess),
            "featuredreleased" => Ok(SortField::FeaturedReleased),
            "releaseddate" | "released" => Ok(SortField::ReleasedDate),
            "rating" => Ok(SortField::Rating),
            _ => Err(format!("unknown sort field '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(format!("unknown sort order '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModLoader {
    Any,
    Forge,
    Cauldron,
    LiteLoader,
    Fabric,
    Quilt,
    NeoForge,
}

impl ModLoader {
    pub fn id(self) -> u32 {
        match self {
            ModLoader::Any => 0,
            ModLoader::Forge => 1,
            ModLoader::Cauldron => 2,
            ModLoader::LiteLoader => 3,
            ModLoader::Fabric => 4,
            ModLoader::Quilt => 5,
            ModLoader::NeoForge => 6,
        }
    }
}

impl FromStr for ModLoader {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(ModLoader::Any),
            "forge" => Ok(ModLoader::Forge),
            "cauldron" => Ok(ModLoader::Cauldron),
            "liteloader" => Ok(ModLoader::LiteLoader),
            "fabric" => Ok(ModLoader::Fabric),
            "quilt" => Ok(ModLoader::Quilt),
            "neoforge" => Ok(ModLoader::NeoForge),
            _ => Err(format!("unknown mod loader '{}'", s)),
        }
    }
}

/// A range violation reported by [`SearchRequest::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchRequestError {
    #[error("Invalid page size: {0} (must be between 1 and 50)")]
    InvalidPageSize(i64),

    #[error("Invalid index: {0} (must be 0 or greater)")]
    InvalidIndex(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub game_id: GameId,
    pub class_id: ClassId,
    pub search_filter: Option<String>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    /// Offset of the first result.
    pub index: i64,
    pub page_size: i64,
    pub game_version: Option<String>,
    pub category_ids: Option<Vec<u32>>,
    pub mod_loader: Option<ModLoader>,
}

impl SearchRequest {
    pub fn new(class_id: ClassId) -> Self {
        Self {
            game_id: GameId::default(),
            class_id,
            search_filter: None,
            sort_field: SortField::TotalDownloads,
            sort_order: SortOrder::default(),
            index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            game_version: None,
            category_ids: None,
            mod_loader: None,
        }
    }

    pub fn modpacks() -> Self {
        Self::new(ClassId::Modpacks)
    }

    pub fn mods() -> Self {
        Self::new(ClassId::Mods)
    }

    pub fn game(&self, game_id: GameId) -> Self {
        Self {
            game_id,
            ..self.clone()
        }
    }

    pub fn search_filter(&self, filter: impl Into<String>) -> Self {
        Self {
            search_filter: Some(filter.into()),
            ..self.clone()
        }
    }

    pub fn sort_by(&self, field: SortField, order: SortOrder) -> Self {
        Self {
            sort_field: field,
            sort_order: order,
            ..self.clone()
        }
    }

    /// Jump to result offset `index`.
    pub fn page(&self, index: i64) -> Self {
        Self {
            index,
            ..self.clone()
        }
    }

    pub fn page_size(&self, page_size: i64) -> Self {
        Self {
            page_size,
            ..self.clone()
        }
    }

    pub fn game_version(&self, version: impl Into<String>) -> Self {
        Self {
            game_version: Some(version.into()),
            ..self.clone()
        }
    }

    pub fn categories(&self, ids: impl IntoIterator<Item = u32>) -> Self {
        Self {
            category_ids: Some(ids.into_iter().collect()),
            ..self.clone()
        }
    }

    pub fn mod_loader(&self, loader: ModLoader) -> Self {
        Self {
            mod_loader: Some(loader),
            ..self.clone()
        }
    }

    /// Query parameters in wire order.
    ///
    /// The fixed fields always come first. Optional fields follow only when
    /// set, an empty search filter is dropped, and each category id becomes
    /// its own `categoryId` parameter.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("gameId", self.game_id.id().to_string()),
            ("classId", self.class_id.id().to_string()),
            ("sortField", self.sort_field.id().to_string()),
            ("sortOrder", self.sort_order.as_str().to_string()),
            ("index", self.index.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];

        if let Some(filter) = self.search_filter.as_deref().filter(|f| !f.is_empty()) {
            params.push(("searchFilter", filter.to_string()));
        }
        if let Some(version) = &self.game_version {
            params.push(("gameVersion", version.clone()));
        }
        if let Some(ids) = &self.category_ids {
            params.extend(ids.iter().map(|id| ("categoryId", id.to_string())));
        }
        if let Some(loader) = self.mod_loader {
            params.push(("modLoaderType", loader.id().to_string()));
        }

        params
    }

    pub fn validate(&self) -> Result<(), SearchRequestError> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(SearchRequestError::InvalidPageSize(self.page_size));
        }
        if self.index < 0 {
            return Err(SearchRequestError::InvalidIndex(self.index));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
