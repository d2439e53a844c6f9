//! imagery-stats CLI - sample recent Tasking Manager projects
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for logging setup, configuration and handling top-level errors.

use anyhow::Context;
use clap::Parser;
use imagery_stats::{output, pipeline, Config, TaskingManagerClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fetch the last 100 active projects and write `docs/projects_summary.json`.
///
/// Settings come from `imagery-stats.toml` (optional) and the `TM_API_BASE` /
/// `IMAGERY_STATS_OUTPUT` environment variables.
#[derive(Parser)]
#[command(name = "imagery-stats")]
#[command(author, version, about, long_about)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = Config::load().context("Failed to load configuration")?;
    let client =
        TaskingManagerClient::new(&config.api).context("Failed to build HTTP client")?;
    tracing::info!(api = client.base_url(), "Starting sample fetch");

    let report = pipeline::run(&client, &config.fetch)
        .await
        .context("Failed to fetch project listing")?;

    output::write_document(&config.output.path, &report.document).with_context(|| {
        format!("Failed to write {}", config.output.path.display())
    })?;

    for (category, count) in report.document.imagery_breakdown() {
        if count > 0 {
            tracing::info!("  {category}: {count}");
        }
    }
    if !report.failures.is_empty() {
        tracing::warn!(failed = report.failures.len(), "Some projects were skipped");
    }

    println!(
        "\nWrote {} projects to {}",
        report.document.total_projects,
        config.output.path.display()
    );

    Ok(())
}
