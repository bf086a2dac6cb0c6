use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use craftmeta_core::BatchResolver;
use craftmeta_mojang::format_uuid;

use crate::commands::mojang_client;
use crate::{CliError, Context, print_json};

/// Show a player's profile, optionally saving their textures.
pub(crate) async fn run_player(
    ctx: &Context,
    name: &str,
    save_skin: Option<PathBuf>,
    save_cape: Option<PathBuf>,
) -> Result<(), CliError> {
    let client = mojang_client(ctx)?;
    let profile = client.fetch_full_profile_by_name(name).await?;

    if ctx.json {
        print_json(&profile)?;
    } else {
        println!("{}", profile.name.if_supports_color(Stdout, |t| t.bold()));
        println!("  UUID:  {}", format_uuid(&profile.id));
        match (profile.skin_url(), profile.skin_model()) {
            (Some(url), Some(model)) => println!("  Skin:  {} ({})", url, model),
            _ => println!(
                "  Skin:  {}",
                "default".if_supports_color(Stdout, |t| t.dimmed())
            ),
        }
        match profile.cape_url() {
            Some(url) => println!("  Cape:  {}", url),
            None => println!("  Cape:  {}", "none".if_supports_color(Stdout, |t| t.dimmed())),
        }
    }

    if let Some(path) = save_skin {
        let png = client.download_skin_by_uuid(&profile.id).await?;
        write_texture(&path, &png)?;
    }
    if let Some(path) = save_cape {
        let png = client.download_cape_by_uuid(&profile.id).await?;
        write_texture(&path, &png)?;
    }
    Ok(())
}

fn write_texture(path: &Path, png: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, png)?;
    log::info!("Wrote {} bytes to {}", png.len(), path.display());
    Ok(())
}

/// Resolve names to UUIDs and print them in input order.
pub(crate) async fn run_uuids(
    ctx: &Context,
    names: Vec<String>,
    chunk_size: usize,
    concurrency: usize,
) -> Result<(), CliError> {
    let client = mojang_client(ctx)?;
    let resolver = BatchResolver::new(chunk_size).with_concurrency(concurrency);
    let found = client.fetch_uuids_with(&names, resolver).await?;

    if ctx.json {
        return print_json(&found);
    }

    for name in craftmeta_core::normalize_keys(&names) {
        match found.get(&name) {
            Some(id) => println!("  {:<16} {}", name, format_uuid(id)),
            None => println!(
                "  {:<16} {}",
                name,
                "not found".if_supports_color(Stdout, |t| t.yellow())
            ),
        }
    }
    Ok(())
}

pub(crate) async fn run_blocked_servers(ctx: &Context) -> Result<(), CliError> {
    let client = mojang_client(ctx)?;
    let hashes = client.fetch_blocked_servers().await?;

    if ctx.json {
        return print_json(&hashes);
    }
    for hash in &hashes {
        println!("{}", hash);
    }
    log::info!("{} blocked servers", hashes.len());
    Ok(())
}
