use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use craftmeta_curseforge::credentials::{self, ApiKey, CredentialSource};

use crate::{CliError, Context, print_json};

/// Show the API key and where it comes from.
pub(crate) fn run_config_show(ctx: &Context) -> Result<(), CliError> {
    let path = credentials::config_path();
    let key = ApiKey::load().ok();
    let source = key
        .as_ref()
        .map(|k| k.source.clone())
        .unwrap_or(CredentialSource::Missing);

    if ctx.json {
        return print_json(&serde_json::json!({
            "config_path": path,
            "api_key": key.as_ref().map(ApiKey::masked),
            "source": source.to_string(),
        }));
    }

    println!(
        "{}",
        "CurseForge Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    match &path {
        Some(p) if p.exists() => println!(
            "  Config file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        ),
        Some(p) => println!(
            "  Config file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => println!(
            "  Config file: {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }

    let source_str = format!("({})", source);
    match &key {
        Some(k) => println!(
            "  {} {} {}",
            "api_key:".if_supports_color(Stdout, |t| t.cyan()),
            k.masked(),
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => println!(
            "  {} {} {}",
            "api_key:".if_supports_color(Stdout, |t| t.cyan()),
            "not set".if_supports_color(Stdout, |t| t.yellow()),
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
    Ok(())
}

pub(crate) fn run_config_set_key(key: &str) -> Result<(), CliError> {
    let path = credentials::save_to_file(key)?;
    println!(
        "Saved API key to {}",
        path.display().if_supports_color(Stdout, |t| t.cyan())
    );
    if std::env::var(credentials::API_KEY_ENV).is_ok() {
        println!(
            "{} ${} is set and takes precedence over the file",
            "note:".if_supports_color(Stdout, |t| t.yellow()),
            credentials::API_KEY_ENV,
        );
    }
    Ok(())
}

pub(crate) fn run_config_path() -> Result<(), CliError> {
    match credentials::config_path() {
        Some(p) => {
            println!("{}", p.display());
            Ok(())
        }
        None => Err(CliError::config("Could not determine config directory")),
    }
}
