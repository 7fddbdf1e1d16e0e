use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    toolcatalog::logging::init().context("init logging")?;

    let cli = toolcatalog::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        toolcatalog::cli::Command::Build(args) => {
            toolcatalog::build::run(args).await.context("build")?;
        }
        toolcatalog::cli::Command::Tools(args) => {
            toolcatalog::pages::tools(args).await.context("tools")?;
        }
        toolcatalog::cli::Command::Categories(args) => {
            toolcatalog::pages::categories(args)
                .await
                .context("categories")?;
        }
        toolcatalog::cli::Command::Faqs(args) => {
            toolcatalog::pages::faqs(args).await.context("faqs")?;
        }
        toolcatalog::cli::Command::Platforms(args) => {
            toolcatalog::pages::platforms(args)
                .await
                .context("platforms")?;
        }
        toolcatalog::cli::Command::Table(args) => {
            toolcatalog::pages::table(args).await.context("table")?;
        }
        toolcatalog::cli::Command::Stats(args) => {
            toolcatalog::pages::stats(args).await.context("stats")?;
        }
    }

    Ok(())
}
