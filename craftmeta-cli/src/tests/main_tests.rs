use super::*;
use clap::CommandFactory;
use craftmeta_curseforge::{ClassId, ModLoader, SearchRequest, SortField, SortOrder};
use craftmeta_mojang::VersionType;

use crate::commands::catalog::SearchArgs;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("craftmeta").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_verbosity_levels() {
    assert_eq!(level_for(parse(&["blocked-servers"]).verbose), LevelFilter::Warn);
    assert_eq!(level_for(parse(&["-v", "blocked-servers"]).verbose), LevelFilter::Debug);
    assert_eq!(level_for(parse(&["blocked-servers", "-vv"]).verbose), LevelFilter::Trace);
}

#[test]
fn test_transport_flags() {
    let cli = parse(&["--no-cache", "--timeout", "5", "versions"]);
    let config = transport_config(&cli);
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.cache_policy, CachePolicy::ReloadIgnoringCache);

    let config = transport_config(&parse(&["versions"]));
    assert_eq!(config, TransportConfig::default());
}

#[test]
fn test_versions_type_parses() {
    match parse(&["versions", "--type", "beta", "--v1"]).command {
        Commands::Versions {
            version_type, v1, ..
        } => {
            assert_eq!(version_type, Some(VersionType::OldBeta));
            assert!(v1);
        }
        _ => panic!("wrong command"),
    }
}

#[test]
fn test_uuids_requires_names() {
    assert!(Cli::try_parse_from(["craftmeta", "uuids"]).is_err());
    match parse(&["uuids", "a", "b", "--chunk-size", "0", "--concurrency", "4"]).command {
        Commands::Uuids {
            names,
            chunk_size,
            concurrency,
        } => {
            assert_eq!(names, vec!["a", "b"]);
            assert_eq!(chunk_size, 0);
            assert_eq!(concurrency, 4);
        }
        _ => panic!("wrong command"),
    }
}

#[test]
fn test_config_subcommands() {
    assert!(matches!(
        parse(&["config", "set-key", "abc"]).command,
        Commands::Config {
            action: ConfigAction::SetKey { .. }
        }
    ));
    assert!(Cli::try_parse_from(["craftmeta", "config", "set-key"]).is_err());
}

fn search_args(cli: Cli) -> SearchArgs {
    match cli.command {
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
        } => SearchArgs {
            class,
            filter,
            game_version,
            loader,
            sort,
            order,
            page,
            page_size,
            categories,
        },
        _ => panic!("wrong command"),
    }
}

#[test]
fn test_search_defaults() {
    let request = search_args(parse(&["search", "modpacks"])).to_request();
    assert_eq!(request, SearchRequest::modpacks());
}

#[test]
fn test_search_flags_build_request() {
    let args = search_args(parse(&[
        "search",
        "mod",
        "--filter",
        "create",
        "--game-version",
        "1.20.1",
        "--loader",
        "fabric",
        "--sort",
        "updated",
        "--order",
        "asc",
        "--page",
        "3",
        "--page-size",
        "20",
        "--categories",
        "1,2",
    ]));
    assert_eq!(args.class, ClassId::Mods);

    let request = args.to_request();
    assert_eq!(request.index, 40);
    assert_eq!(request.page_size, 20);
    assert_eq!(request.sort_field, SortField::LastUpdated);
    assert_eq!(request.sort_order, SortOrder::Asc);
    assert_eq!(request.mod_loader, Some(ModLoader::Fabric));
    assert_eq!(request.category_ids, Some(vec![1, 2]));
    assert_eq!(request.search_filter.as_deref(), Some("create"));
    assert!(request.validate().is_ok());
}

#[test]
fn test_page_zero_fails_validation() {
    let request = search_args(parse(&["search", "mods", "--page", "0"])).to_request();
    assert!(request.validate().is_err());
}
