//! Paginated bill listing client.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::records::BillRecord;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status} for page {page}: {body}")]
    Server { page: u32, status: u16, body: String },
    #[error("page {page} is not valid JSON: {source}")]
    Json {
        page: u32,
        #[source]
        source: serde_json::Error,
    },
    #[error("page {page} failed after {attempts} attempts: {source}")]
    Exhausted {
        page: u32,
        attempts: u32,
        #[source]
        source: Box<FetchError>,
    },
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Listing URL; the `page` query parameter is appended per request.
    pub endpoint: String,
    /// Pages `1..max_pages` are requested.
    pub max_pages: u32,
    /// Fixed pause between consecutive requests.
    pub delay: Duration,
    /// Extra attempts per page after the first failure.
    pub retries: u32,
}

#[derive(Deserialize)]
struct ListingPage {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

pub struct CongressClient {
    client: reqwest::Client,
    settings: FetchSettings,
}

impl CongressClient {
    pub fn new(settings: FetchSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    /// Downloads every page and returns the concatenated records.
    ///
    /// Stops early at the first empty page. Any page that keeps failing
    /// aborts the whole run so callers never persist a partial archive.
    pub async fn fetch_all(&self) -> Result<Vec<BillRecord>, FetchError> {
        let mut bills = Vec::new();
        let mut first_request = true;

        for page in 1..self.settings.max_pages {
            let records = self.fetch_page(page, &mut first_request).await?;
            if records.is_empty() {
                debug!(page, "empty page, pagination finished");
                break;
            }
            bills.extend(records);
        }

        info!(count = bills.len(), "downloaded bill records");
        Ok(bills)
    }

    async fn fetch_page(
        &self,
        page: u32,
        first_request: &mut bool,
    ) -> Result<Vec<BillRecord>, FetchError> {
        let attempts = self.settings.retries + 1;
        let mut attempt = 0;

        loop {
            if !*first_request {
                tokio::time::sleep(self.settings.delay).await;
            }
            *first_request = false;
            attempt += 1;

            debug!(page, attempt, "downloading page");
            match self.fetch_page_once(page).await {
                Ok(records) => return Ok(records),
                Err(err) if attempt < attempts => {
                    warn!(page, attempt, error = %err, "page download failed, retrying");
                }
                Err(err) => {
                    return Err(FetchError::Exhausted {
                        page,
                        attempts,
                        source: Box::new(err),
                    })
                }
            }
        }
    }

    async fn fetch_page_once(&self, page: u32) -> Result<Vec<BillRecord>, FetchError> {
        let resp = self
            .client
            .get(&self.settings.endpoint)
            .query(&[("page", page)])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Server {
                page,
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        decode_page(&body).map_err(|source| FetchError::Json { page, source })
    }
}

/// Decodes one listing page, skipping entries that do not look like bills.
pub(crate) fn decode_page(body: &str) -> Result<Vec<BillRecord>, serde_json::Error> {
    let page: ListingPage = serde_json::from_str(body)?;
    let records = page
        .results
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<BillRecord>(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(error = %err, "skipping malformed bill record");
                None
            }
        })
        .collect();
    Ok(records)
}
