//! Gateways that publish a finished headline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PostError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("poster unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostReceipt {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[async_trait]
pub trait StatusPoster: Send + Sync {
    async fn publish(&self, status: &str) -> Result<PostReceipt, PostError>;
}

#[derive(Serialize)]
struct StatusRequest<'a> {
    status: &'a str,
    visibility: &'a str,
}

/// Posts statuses to a Mastodon-compatible instance.
pub struct MastodonPoster {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl MastodonPoster {
    /// `base_url` should be like `https://botsin.space` (no trailing slash).
    pub fn new(base_url: String, access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    fn statuses_url(&self) -> String {
        format!("{}/api/v1/statuses", self.base_url)
    }
}

impl std::fmt::Debug for MastodonPoster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MastodonPoster")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl StatusPoster for MastodonPoster {
    async fn publish(&self, status: &str) -> Result<PostReceipt, PostError> {
        let url = self.statuses_url();
        info!(url = %url, "posting status");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&StatusRequest {
                status,
                visibility: "public",
            })
            .send()
            .await?;
        let status_code = resp.status();
        if !status_code.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PostError::Server {
                status: status_code.as_u16(),
                body,
            });
        }

        let receipt: PostReceipt = resp.json().await?;
        info!(id = %receipt.id, "status posted");
        Ok(receipt)
    }
}

/// Writes statuses to stdout instead of publishing them.
#[derive(Debug, Default)]
pub struct ConsolePoster;

#[async_trait]
impl StatusPoster for ConsolePoster {
    async fn publish(&self, status: &str) -> Result<PostReceipt, PostError> {
        println!("{status}");
        Ok(PostReceipt {
            id: "console".to_string(),
            url: None,
        })
    }
}
