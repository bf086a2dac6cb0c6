//! craftmeta CLI
//!
//! Command-line front end for the Mojang and CurseForge metadata clients.

mod cli_types;
mod commands;
mod error;

use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use craftmeta_core::{CachePolicy, TransportConfig};

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

/// Shared settings every command receives.
pub(crate) struct Context {
    pub json: bool,
    pub transport: TransportConfig,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!(
            "{} {}",
            "error:".if_supports_color(Stderr, |t| t.red()),
            e
        );
        std::process::exit(1);
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// `RUST_LOG` still wins over the `-v` level.
fn init_logging(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(level_for(verbose))
        .parse_default_env()
        .init();
}

fn transport_config(cli: &Cli) -> TransportConfig {
    TransportConfig {
        timeout: Duration::from_secs(cli.timeout),
        cache_policy: if cli.no_cache {
            CachePolicy::ReloadIgnoringCache
        } else {
            CachePolicy::UseProtocol
        },
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context {
        json: cli.json,
        transport: transport_config(&cli),
    };

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))?;
    rt.block_on(dispatch(&ctx, cli.command))
}

async fn dispatch(ctx: &Context, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Versions {
            version_type,
            v1,
            limit,
        } => commands::versions::run_versions(ctx, version_type, v1, limit).await,
        Commands::Version { id } => commands::versions::run_version(ctx, &id).await,
        Commands::Player {
            name,
            save_skin,
            save_cape,
        } => commands::player::run_player(ctx, &name, save_skin, save_cape).await,
        Commands::Uuids {
            names,
            chunk_size,
            concurrency,
        } => commands::player::run_uuids(ctx, names, chunk_size, concurrency).await,
        Commands::BlockedServers => commands::player::run_blocked_servers(ctx).await,
        Commands::Search {
            class,
            filter,
            game_version,
            loader,
            sort,
            order,
            page,
            page_size,
            categories,
        } => {
            let args = commands::catalog::SearchArgs {
                class,
                filter,
                game_version,
                loader,
                sort,
                order,
                page,
                page_size,
                categories,
            };
            commands::catalog::run_search(ctx, args).await
        }
        Commands::Mod { id } => commands::catalog::run_mod(ctx, id).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(ctx),
            ConfigAction::SetKey { key } => commands::config::run_config_set_key(&key),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    }
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
