use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::cli::{BuildArgs, DataArgs, GithubArgs, PageArgs, ToolsArgs};
use crate::config::CatalogConfig;
use crate::github::DEFAULT_API_BASE;
use crate::pages::{or_empty, write_output};
use crate::stats::catalog_stats;

pub const TOOLS_FRAGMENT: &str = "tools-list.html";
pub const CATEGORIES_FRAGMENT: &str = "categories-list.html";
pub const FAQS_FRAGMENT: &str = "faqs-list.html";
pub const PLATFORMS_FRAGMENT: &str = "platforms-list.html";
pub const TABLE_FRAGMENT: &str = "software-table.html";
pub const STATS_FILE: &str = "stats.json";

/// Renders every page the config names into `args.out`. Enrichment is
/// never requested: a full build has no fragment to expand.
pub async fn run(args: BuildArgs) -> anyhow::Result<()> {
    let config = CatalogConfig::load(Path::new(&args.config)).context("load catalog config")?;
    let sort = config.sort_key()?;

    let out_dir = PathBuf::from(&args.out);
    if out_dir.exists() && !args.force {
        anyhow::bail!("output directory already exists: {}", out_dir.display());
    }
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output dir: {}", out_dir.display()))?;
    let out = |name: &str| out_dir.join(name).to_string_lossy().to_string();

    if let Some(tools) = &config.tools {
        tracing::info!(data = %tools, sort = ?sort, "build: tools");
        crate::pages::tools(ToolsArgs {
            data: tools.clone(),
            out: out(TOOLS_FRAGMENT),
            url: None,
            sort,
            cats: None,
            github: disabled_github(),
            force: args.force,
        })
        .await
        .context("tools")?;
    }

    if let Some(categories) = &config.categories {
        tracing::info!(data = %categories, "build: categories");
        crate::pages::categories(PageArgs {
            data: categories.clone(),
            out: out(CATEGORIES_FRAGMENT),
            url: None,
            force: args.force,
        })
        .await
        .context("categories")?;
    }

    if let Some(faqs) = &config.faqs {
        tracing::info!(data = %faqs, "build: faqs");
        crate::pages::faqs(PageArgs {
            data: faqs.clone(),
            out: out(FAQS_FRAGMENT),
            url: None,
            force: args.force,
        })
        .await
        .context("faqs")?;
    }

    if let Some(platforms) = &config.platforms {
        tracing::info!(data = %platforms, "build: platforms");
        crate::pages::platforms(DataArgs {
            data: platforms.clone(),
            out: out(PLATFORMS_FRAGMENT),
            force: args.force,
        })
        .await
        .context("platforms")?;
    }

    if let Some(table) = &config.table {
        tracing::info!(data = %table, "build: table");
        crate::pages::table(DataArgs {
            data: table.clone(),
            out: out(TABLE_FRAGMENT),
            force: args.force,
        })
        .await
        .context("table")?;
    }

    if let (Some(tools), Some(categories)) = (&config.tools, &config.categories) {
        tracing::info!("build: stats");
        let tools = or_empty(crate::source::load_tools(tools).await)?;
        let categories = or_empty(crate::source::load_categories(categories).await)?;
        let stats = catalog_stats(&tools, &categories);
        let json = serde_json::to_string_pretty(&stats).context("serialize stats")?;
        write_output(Path::new(&out(STATS_FILE)), &json, args.force)?;
    }

    Ok(())
}

fn disabled_github() -> GithubArgs {
    GithubArgs {
        enrich: false,
        github_api: DEFAULT_API_BASE.to_owned(),
    }
}
