//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use craftmeta_curseforge::{ClassId, ModLoader, SortField, SortOrder};
use craftmeta_mojang::VersionType;

#[derive(Parser)]
#[command(name = "craftmeta")]
#[command(about = "Query Minecraft version, player and mod catalog metadata", long_about = None)]
pub(crate) struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    pub json: bool,

    /// Ask servers and proxies to bypass their caches
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List game versions from the version manifest
    Versions {
        /// Only show versions of this type (release, snapshot, beta, alpha)
        #[arg(short = 't', long = "type")]
        version_type: Option<VersionType>,

        /// Use the v1 manifest
        #[arg(long)]
        v1: bool,

        /// Maximum number of versions to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show launch metadata for one version
    Version {
        /// Version id, e.g. 1.21.1
        id: String,
    },

    /// Show a player's profile and textures
    Player {
        /// Player name
        name: String,

        /// Save the skin PNG to this path
        #[arg(long)]
        save_skin: Option<PathBuf>,

        /// Save the cape PNG to this path
        #[arg(long)]
        save_cape: Option<PathBuf>,
    },

    /// Resolve player names to UUIDs in batches
    Uuids {
        /// Player names
        #[arg(required = true)]
        names: Vec<String>,

        /// Names per lookup request (0 sends everything at once)
        #[arg(long, default_value_t = craftmeta_core::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Lookup requests in flight at once
        #[arg(long, default_value_t = 1)]
        concurrency: usize,
    },

    /// List hashes of servers blocked by Mojang
    BlockedServers,

    /// Search the CurseForge catalog
    Search {
        /// Content class (mods, modpacks, resource-packs, shaders, ...)
        class: ClassId,

        /// Free-text filter
        #[arg(short, long)]
        filter: Option<String>,

        /// Only results for this game version
        #[arg(short, long)]
        game_version: Option<String>,

        /// Only results for this mod loader
        #[arg(short, long)]
        loader: Option<ModLoader>,

        /// Sort field (downloads, updated, name, popularity, ...)
        #[arg(long, default_value = "downloads")]
        sort: SortField,

        /// Sort order (asc, desc)
        #[arg(long, default_value = "desc")]
        order: SortOrder,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: i64,

        /// Results per page (1-50)
        #[arg(long, default_value_t = craftmeta_curseforge::DEFAULT_PAGE_SIZE)]
        page_size: i64,

        /// Comma-separated category ids
        #[arg(long, value_delimiter = ',')]
        categories: Option<Vec<u32>>,
    },

    /// Show one CurseForge project
    Mod {
        /// Project id
        id: u64,
    },

    /// Manage the CurseForge API key
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the API key and where it comes from
    Show,

    /// Save an API key to the config file
    SetKey {
        /// The key
        key: String,
    },

    /// Print the config file path
    Path,
}
