use clap::{Args, Parser, Subcommand};

use crate::github::DEFAULT_API_BASE;
use crate::sort::SortKey;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render every page fragment listed in a catalog config.
    Build(BuildArgs),
    /// Render the tools list.
    Tools(ToolsArgs),
    /// Render the categories list.
    Categories(PageArgs),
    /// Render the FAQ list.
    Faqs(PageArgs),
    /// Render the platform list.
    Platforms(DataArgs),
    /// Render the software table body from a TSV file.
    Table(DataArgs),
    /// Print catalog counts as JSON.
    Stats(StatsArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GithubArgs {
    /// Look up GitHub badges for the panel named by the URL fragment.
    #[arg(long)]
    pub enrich: bool,

    /// GitHub API base URL.
    #[arg(long, env = "TOOLCATALOG_GITHUB_API", default_value = DEFAULT_API_BASE)]
    pub github_api: String,
}

#[derive(Debug, Args)]
pub struct ToolsArgs {
    /// Tools JSON (path or http/https URL).
    #[arg(long)]
    pub data: String,

    /// Output file for the rendered fragment.
    #[arg(long)]
    pub out: String,

    /// Page address to render for, e.g. `tools.html?sort=cites&cats=Python#Seurat`.
    #[arg(long)]
    pub url: Option<String>,

    /// Sort key (overrides `sort` in --url).
    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,

    /// Comma-separated categories to keep (overrides `cats` in --url).
    #[arg(long)]
    pub cats: Option<String>,

    #[command(flatten)]
    pub github: GithubArgs,

    /// Overwrite the output file if it exists.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Input JSON (path or http/https URL).
    #[arg(long)]
    pub data: String,

    /// Output file for the rendered fragment.
    #[arg(long)]
    pub out: String,

    /// Page address whose fragment selects the panel to expand.
    #[arg(long)]
    pub url: Option<String>,

    /// Overwrite the output file if it exists.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct DataArgs {
    /// Input data (path or http/https URL).
    #[arg(long)]
    pub data: String,

    /// Output file for the rendered fragment.
    #[arg(long)]
    pub out: String,

    /// Overwrite the output file if it exists.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Tools JSON (path or http/https URL).
    #[arg(long)]
    pub tools: String,

    /// Categories JSON (path or http/https URL).
    #[arg(long)]
    pub categories: String,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Catalog config (`catalog.yaml`).
    #[arg(long)]
    pub config: String,

    /// Output directory for the rendered fragments.
    #[arg(long)]
    pub out: String,

    /// Render into an existing output directory, overwriting fragments.
    #[arg(long)]
    pub force: bool,
}
