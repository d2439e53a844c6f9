//! Fetch → normalize orchestration for a single sampling run.

use crate::client::{FetchError, TaskingManagerClient};
use crate::config::FetchConfig;
use crate::fetcher::{collect_project_ids, fetch_project, FetchFailure, FetchOutcome};
use crate::normalize::summarize_project;
use crate::record::{SummaryDocument, SummaryRecord};
use chrono::Utc;
use tracing::{info, warn};

/// Project names are cut to this many characters in progress lines
const PROGRESS_NAME_LEN: usize = 50;

/// Outcome of a sampling run
#[derive(Debug)]
pub struct RunReport {
    pub document: SummaryDocument,
    /// Detail fetches that failed and were left out of the document
    pub failures: Vec<FetchFailure>,
}

/// Run the full sample: list ids, fetch each project in turn, normalize.
///
/// Only a listing failure is returned as an error; detail failures are
/// logged and collected in the report.
pub async fn run(
    client: &TaskingManagerClient,
    fetch: &FetchConfig,
) -> Result<RunReport, FetchError> {
    let ids = collect_project_ids(client, fetch).await?;
    info!(count = ids.len(), "got project ids, fetching details");

    let total = ids.len();
    let mut projects: Vec<SummaryRecord> = Vec::with_capacity(total);
    let mut failures = Vec::new();

    for (index, id) in ids.into_iter().enumerate() {
        let position = index + 1;
        match fetch_project(client, id).await {
            FetchOutcome::Fetched { id, record } => {
                let summary = summarize_project(id, &record);
                info!(
                    "[{position}/{total}] #{id} - {} - {}",
                    summary.imagery,
                    truncate_name(&summary.name)
                );
                projects.push(summary);
            }
            FetchOutcome::Failed(failure) => {
                warn!(
                    "[{position}/{total}] #{} - FAILED: {}",
                    failure.id, failure.reason
                );
                failures.push(failure);
            }
        }
    }

    Ok(RunReport {
        document: SummaryDocument::new(projects, Utc::now()),
        failures,
    })
}

fn truncate_name(name: &str) -> String {
    name.chars().take(PROGRESS_NAME_LEN).collect()
}
