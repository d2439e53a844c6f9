//! Tasking Manager REST client.
//!
//! Uses reqwest for the listing and project detail endpoints. Requests are
//! plain GETs with a fixed timeout and no retry.

use crate::config::{ApiConfig, FetchConfig};
use crate::record::{ListingPage, RawProjectRecord};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, Url};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

/// HTTP client for the Tasking Manager v2 API.
pub struct TaskingManagerClient {
    client: Client,
    base_url: String,
}

impl TaskingManagerClient {
    /// Create a configured client for the API at `api.base_url`
    pub fn new(api: &ApiConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(api.user_agent.as_str())
            .default_headers(headers)
            .timeout(api.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of the project listing, most recently updated first
    pub async fn list_projects(
        &self,
        fetch: &FetchConfig,
        page: u32,
    ) -> Result<ListingPage, FetchError> {
        let mut url = self.endpoint("projects/")?;
        url.query_pairs_mut()
            .append_pair("orderBy", &fetch.order_by)
            .append_pair("orderByType", &fetch.order_by_type)
            .append_pair("projectStatuses", &fetch.status_filter())
            .append_pair("page", &page.to_string());

        debug!(url = %url, page, "fetching project listing");
        let resp = check_status(self.client.get(url).send().await?).await?;
        Ok(resp.json().await?)
    }

    /// Fetch the detail record of a single project
    pub async fn project(&self, id: u64) -> Result<RawProjectRecord, FetchError> {
        let url = self.endpoint(&format!("projects/{id}/"))?;

        debug!(url = %url, "fetching project detail");
        let resp = check_status(self.client.get(url).send().await?).await?;
        Ok(resp.json().await?)
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }
}

async fn check_status(resp: Response) -> Result<Response, FetchError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(FetchError::Server {
        status: status.as_u16(),
        body,
    })
}
