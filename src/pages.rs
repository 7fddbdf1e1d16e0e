use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;

use crate::categories::render_categories;
use crate::cli::{DataArgs, GithubArgs, PageArgs, StatsArgs, ToolsArgs};
use crate::error::CatalogError;
use crate::faqs::render_faqs;
use crate::platforms::render_platforms;
use crate::github::{BadgeSource, GithubClient};
use crate::query::{ListQuery, parse_page_address, split_categories};
use crate::render::render_tools;
use crate::source;
use crate::stats::catalog_stats;
use crate::table::render_table_rows;

pub async fn tools(args: ToolsArgs) -> anyhow::Result<()> {
    let (mut query, fragment) = match args.url.as_deref() {
        Some(address) => parse_page_address(address),
        None => (ListQuery::default(), None),
    };
    if let Some(sort) = args.sort {
        query.sort = Some(sort);
    }
    if let Some(cats) = args.cats.as_deref() {
        query.cats = split_categories(cats);
    }

    let tools = or_empty(source::load_tools(&args.data).await)?;
    let client = github_client(&args.github)?;
    let badges = client.as_ref().map(|c| c as &dyn BadgeSource);

    let rendered = render_tools(tools, query, fragment.as_deref(), badges).await;
    write_output(Path::new(&args.out), &rendered.html, args.force)?;
    tracing::info!(
        out = %args.out,
        tools = rendered.layout.tool_count(),
        expanded = ?rendered.session.expanded(),
        "wrote tools list"
    );
    Ok(())
}

pub async fn categories(args: PageArgs) -> anyhow::Result<()> {
    let fragment = page_fragment(args.url.as_deref());
    let categories = or_empty(source::load_categories(&args.data).await)?;
    let rendered = render_categories(&categories, fragment.as_deref());
    write_output(Path::new(&args.out), &rendered.html, args.force)?;
    tracing::info!(out = %args.out, categories = categories.len(), "wrote categories list");
    Ok(())
}

pub async fn faqs(args: PageArgs) -> anyhow::Result<()> {
    let fragment = page_fragment(args.url.as_deref());
    let faqs = or_empty(source::load_faqs(&args.data).await)?;
    let rendered = render_faqs(&faqs, fragment.as_deref());
    write_output(Path::new(&args.out), &rendered.html, args.force)?;
    tracing::info!(out = %args.out, faqs = faqs.len(), "wrote faq list");
    Ok(())
}

pub async fn platforms(args: DataArgs) -> anyhow::Result<()> {
    let platforms = or_empty(source::load_platforms(&args.data).await)?;
    write_output(Path::new(&args.out), &render_platforms(&platforms), args.force)?;
    tracing::info!(out = %args.out, platforms = platforms.len(), "wrote platform list");
    Ok(())
}

pub async fn table(args: DataArgs) -> anyhow::Result<()> {
    let tsv = match source::load_text(&args.data).await {
        Ok(tsv) => tsv,
        Err(err @ CatalogError::DataUnavailable { .. }) => {
            tracing::warn!(%err, "rendering empty table");
            String::new()
        }
        Err(err) => return Err(err.into()),
    };
    write_output(Path::new(&args.out), &render_table_rows(&tsv), args.force)?;
    tracing::info!(out = %args.out, "wrote software table");
    Ok(())
}

pub async fn stats(args: StatsArgs) -> anyhow::Result<()> {
    let tools = or_empty(source::load_tools(&args.tools).await)?;
    let categories = or_empty(source::load_categories(&args.categories).await)?;
    let stats = catalog_stats(&tools, &categories);
    println!(
        "{}",
        serde_json::to_string(&stats).context("serialize stats")?
    );
    Ok(())
}

/// Unreachable data renders as an empty list; anything else fails the command.
pub fn or_empty<T>(loaded: Result<Vec<T>, CatalogError>) -> anyhow::Result<Vec<T>> {
    match loaded {
        Ok(records) => Ok(records),
        Err(err @ CatalogError::DataUnavailable { .. }) => {
            tracing::warn!(%err, "rendering empty list");
            Ok(Vec::new())
        }
        Err(err) => Err(err.into()),
    }
}

/// Sends `GITHUB_TOKEN` as a bearer token when it is set.
pub fn github_client(args: &GithubArgs) -> anyhow::Result<Option<GithubClient>> {
    if !args.enrich {
        return Ok(None);
    }
    let token = std::env::var("GITHUB_TOKEN").ok();
    GithubClient::new(&args.github_api, token).map(Some)
}

fn page_fragment(address: Option<&str>) -> Option<String> {
    address.and_then(|address| parse_page_address(address).1)
}

/// Existing outputs are refused unless `force` is set.
pub fn write_output(path: &Path, contents: &str, force: bool) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir: {}", parent.display()))?;
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut out = options
        .open(path)
        .with_context(|| format!("open output: {}", path.display()))?;
    out.write_all(contents.as_bytes())
        .with_context(|| format!("write output: {}", path.display()))?;
    out.flush()
        .with_context(|| format!("flush output: {}", path.display()))?;
    Ok(())
}
