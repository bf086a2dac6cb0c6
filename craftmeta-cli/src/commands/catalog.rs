use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use craftmeta_curseforge::{
    ApiKey, ClassId, CurseForgeClient, CurseForgeConfig, ModLoader, ModsSearchResponse,
    SearchRequest, SortField, SortOrder,
};

use crate::{CliError, Context, print_json};

/// Arguments of the `search` command.
pub(crate) struct SearchArgs {
    pub class: ClassId,
    pub filter: Option<String>,
    pub game_version: Option<String>,
    pub loader: Option<ModLoader>,
    pub sort: SortField,
    pub order: SortOrder,
    /// 1-based.
    pub page: i64,
    pub page_size: i64,
    pub categories: Option<Vec<u32>>,
}

impl SearchArgs {
    pub(crate) fn to_request(&self) -> SearchRequest {
        let mut request = SearchRequest::new(self.class)
            .sort_by(self.sort, self.order)
            .page_size(self.page_size)
            .page((self.page - 1).saturating_mul(self.page_size));
        if let Some(filter) = &self.filter {
            request = request.search_filter(filter.as_str());
        }
        if let Some(version) = &self.game_version {
            request = request.game_version(version.as_str());
        }
        if let Some(loader) = self.loader {
            request = request.mod_loader(loader);
        }
        if let Some(ids) = &self.categories {
            request = request.categories(ids.iter().copied());
        }
        request
    }
}

fn curseforge_client(ctx: &Context) -> Result<CurseForgeClient, CliError> {
    let key = ApiKey::load()?;
    log::debug!("Using CurseForge API key from {}", key.source);
    let config = CurseForgeConfig::new(key.key).with_transport(ctx.transport.clone());
    Ok(CurseForgeClient::new(config)?)
}

pub(crate) async fn run_search(ctx: &Context, args: SearchArgs) -> Result<(), CliError> {
    let client = curseforge_client(ctx)?;
    let request = args.to_request();
    let response = client.search(&request).await?;

    if ctx.json {
        return print_json(&response);
    }
    print_results(&response);
    Ok(())
}

fn print_results(response: &ModsSearchResponse) {
    let p = &response.pagination;
    if response.is_empty() {
        println!("No results.");
        return;
    }

    for m in &response.data {
        println!(
            "  {:>8}  {}  {}",
            m.id.if_supports_color(Stdout, |t| t.dimmed()),
            m.name.if_supports_color(Stdout, |t| t.bold()),
            format!("({} downloads)", m.formatted_download_count())
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        if !m.summary.is_empty() {
            println!("            {}", m.summary);
        }
    }
    println!();

    let mut footer = format!(
        "Page {} of {} ({} total)",
        p.current_page(),
        p.total_pages(),
        p.total_count
    );
    if p.has_next_page() {
        footer.push_str(&format!(", next: --page {}", p.current_page() + 1));
    }
    println!("{}", footer.if_supports_color(Stdout, |t| t.dimmed()));
}

pub(crate) async fn run_mod(ctx: &Context, id: u64) -> Result<(), CliError> {
    let client = curseforge_client(ctx)?;
    let m = client.fetch_mod(id).await?;

    if ctx.json {
        return print_json(&m);
    }

    println!(
        "{} {}",
        m.name.if_supports_color(Stdout, |t| t.bold()),
        format!("[{}]", m.slug).if_supports_color(Stdout, |t| t.dimmed()),
    );
    if !m.summary.is_empty() {
        println!("  {}", m.summary);
    }
    if let Some(class) = m.class() {
        println!("  Class:      {}", class);
    }
    let authors: Vec<&str> = m.authors.iter().map(|a| a.name.as_str()).collect();
    if !authors.is_empty() {
        println!("  Authors:    {}", authors.join(", "));
    }
    println!("  Downloads:  {}", m.formatted_download_count());
    println!("  Updated:    {}", m.date_modified.format("%Y-%m-%d"));

    let versions = m.supported_game_versions();
    if !versions.is_empty() {
        println!("  Versions:   {}", versions.join(", "));
    }
    if let Some(url) = &m.links.website_url {
        println!("  Website:    {}", url.if_supports_color(Stdout, |t| t.cyan()));
    }

    if let Some(file) = m.latest_release_file() {
        println!();
        println!(
            "  Latest release: {} ({}, {})",
            file.display_name,
            file.formatted_file_size(),
            file.release_type_name()
        );
        if let Some(sha1) = file.sha1_hash() {
            println!("    sha1: {}", sha1);
        }
        match &file.download_url {
            Some(url) => println!("    url:  {}", url),
            None => println!(
                "    url:  {}",
                "third-party downloads disabled".if_supports_color(Stdout, |t| t.yellow())
            ),
        }
    }
    Ok(())
}
