use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use craftmeta_mojang::{ManifestFormat, VersionType};

use crate::commands::mojang_client;
use crate::{CliError, Context, print_json};

/// List versions from the manifest, newest first.
pub(crate) async fn run_versions(
    ctx: &Context,
    version_type: Option<VersionType>,
    v1: bool,
    limit: Option<usize>,
) -> Result<(), CliError> {
    let client = mojang_client(ctx)?;
    let format = if v1 {
        ManifestFormat::V1
    } else {
        ManifestFormat::V2
    };
    let manifest = client.fetch_version_manifest_with(format).await?;

    let versions: Vec<_> = manifest
        .versions
        .iter()
        .filter(|v| version_type.is_none_or(|t| v.version_type == t))
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    if ctx.json {
        return print_json(&versions);
    }

    println!(
        "Latest release: {}  snapshot: {}",
        manifest
            .latest
            .release
            .if_supports_color(Stdout, |t| t.green()),
        manifest
            .latest
            .snapshot
            .if_supports_color(Stdout, |t| t.yellow()),
    );
    println!();

    for v in &versions {
        println!(
            "  {:<24} {:<10} {}",
            v.id.if_supports_color(Stdout, |t| t.bold()),
            v.version_type.as_str(),
            v.formatted_release_date()
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::debug!(
        "{} of {} versions shown",
        versions.len(),
        manifest.versions.len()
    );
    Ok(())
}

/// Show the launch metadata for a single version.
pub(crate) async fn run_version(ctx: &Context, id: &str) -> Result<(), CliError> {
    let client = mojang_client(ctx)?;
    let details = client.fetch_version_details(id).await?;

    if ctx.json {
        return print_json(&details);
    }

    println!(
        "{} ({})",
        details.id.if_supports_color(Stdout, |t| t.bold()),
        details.version_type
    );
    println!("  Released:    {}", details.release_time.format("%Y-%m-%d %H:%M UTC"));
    println!("  Main class:  {}", details.main_class);
    println!(
        "  Java:        {} ({})",
        details.java_version.major_version, details.java_version.component
    );
    println!("  Assets:      {}", details.assets);
    println!("  Client jar:  {}", details.client_download_url());
    println!("  Libraries:   {}", details.libraries.len());
    println!("  Download:    {}", details.formatted_download_size());

    let style = if details.uses_structured_arguments() {
        "structured"
    } else if details.uses_legacy_arguments() {
        "legacy"
    } else {
        "none"
    };
    println!("  Arguments:   {}", style);
    let game_args = details.game_argument_strings();
    if !game_args.is_empty() {
        println!(
            "    game: {}",
            game_args
                .join(" ")
                .if_supports_color(Stdout, |t| t.dimmed())
        );
    }
    let jvm_args = details.jvm_argument_strings();
    if !jvm_args.is_empty() {
        println!(
            "    jvm:  {}",
            jvm_args
                .join(" ")
                .if_supports_color(Stdout, |t| t.dimmed())
        );
    }
    Ok(())
}
