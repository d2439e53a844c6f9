//! Sampling of recent projects: listing walk and per-project detail fetch.

use crate::client::{FetchError, TaskingManagerClient};
use crate::config::FetchConfig;
use crate::record::RawProjectRecord;
use tracing::{debug, info};

/// A project whose detail could not be retrieved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub id: u64,
    pub reason: String,
}

/// Result of fetching one listed project
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched { id: u64, record: RawProjectRecord },
    Failed(FetchFailure),
}

/// Walk the listing until `max_projects` ids are collected or `max_pages`
/// pages have been read. Any listing failure aborts the walk.
pub async fn collect_project_ids(
    client: &TaskingManagerClient,
    fetch: &FetchConfig,
) -> Result<Vec<u64>, FetchError> {
    info!(
        pages = fetch.max_pages,
        target = fetch.max_projects,
        "fetching project listing"
    );

    let mut ids = Vec::with_capacity(fetch.max_projects);
    for page in 1..=fetch.max_pages {
        let listing = client.list_projects(fetch, page).await?;
        ids.extend(listing.results.iter().map(|entry| entry.project_id));
        debug!(page, collected = ids.len(), "listing page read");

        if ids.len() >= fetch.max_projects || listing.is_last() {
            break;
        }
    }

    ids.truncate(fetch.max_projects);
    Ok(ids)
}

/// Fetch the detail of one project, turning any error into a failure marker
pub async fn fetch_project(client: &TaskingManagerClient, id: u64) -> FetchOutcome {
    match client.project(id).await {
        Ok(record) => FetchOutcome::Fetched { id, record },
        Err(e) => FetchOutcome::Failed(FetchFailure {
            id,
            reason: e.to_string(),
        }),
    }
}
