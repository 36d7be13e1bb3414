use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::errors::RemoteError;
use super::retry::RetryPolicy;
use crate::domain::models::{Candidate, RemoteConfig};
use crate::domain::ports::{CandidateSource, PublishTarget};

/// Listing envelope returned by `GET /posts.json`
#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default)]
    posts: Vec<Candidate>,
}

/// HTTP client for the remote media service
///
/// Features:
/// - Connection pooling and reuse (via `reqwest::Client`)
/// - Basic authentication with the configured credential pair
/// - Exponential backoff retry for transient errors (429, 5xx, network)
/// - Idempotent favorite/unfavorite handling
pub struct RemoteClient {
    http_client: ReqwestClient,
    base_url: String,
    login: String,
    api_key: String,
    retry_policy: RetryPolicy,
}

impl RemoteClient {
    /// Create a new client from configuration
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .pool_max_idle_per_host(4)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            login: config.login.clone(),
            api_key: config.api_key.clone(),
            retry_policy: RetryPolicy::new(
                config.max_retries,
                config.initial_backoff_ms,
                config.max_backoff_ms,
            ),
        })
    }

    pub fn has_credentials(&self) -> bool {
        !self.login.is_empty() && !self.api_key.is_empty()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        if self.login.is_empty() {
            request
        } else {
            request.basic_auth(&self.login, Some(&self.api_key))
        }
    }

    /// Send an authenticated request built by `build`, retrying transient failures
    ///
    /// The builder is invoked once per attempt since a request cannot be reused.
    async fn send<F>(&self, build: F) -> Result<Response, RemoteError>
    where
        F: Fn() -> RequestBuilder,
    {
        self.execute(|| self.authorize(build())).await
    }

    async fn execute<F>(&self, build: F) -> Result<Response, RemoteError>
    where
        F: Fn() -> RequestBuilder,
    {
        self.retry_policy
            .execute(|| {
                let request = build();
                async move {
                    let response = request.send().await?;
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unable to read error body".to_string());
                    Err(RemoteError::from_status(status, body))
                }
            })
            .await
    }

    /// Download a media file into `dir`, named after the post id
    ///
    /// Media hosts are public, so no credentials are attached.
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub async fn download(&self, post_id: i64, url: &str, dir: &Path) -> Result<PathBuf> {
        let response = self
            .execute(|| self.http_client.get(url))
            .await
            .with_context(|| format!("Failed to download media for post {post_id}"))?;
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read media body for post {post_id}"))?;

        let path = dir.join(post_id.to_string());
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!(post_id, bytes = bytes.len(), "media downloaded");
        Ok(path)
    }
}

#[async_trait]
impl CandidateSource for RemoteClient {
    #[instrument(skip(self))]
    async fn fetch_page(&self, query: &str, page: u32, limit: u32) -> Result<Vec<Candidate>> {
        let url = self.url("/posts.json");
        let params = [
            ("limit", limit.to_string()),
            ("tags", query.to_string()),
            ("page", page.to_string()),
        ];

        let response = self
            .send(|| {
                self.http_client
                    .get(&url)
                    .query(&params)
                    .header(header::ACCEPT, "application/json")
            })
            .await?;

        let body = response.text().await.map_err(RemoteError::from)?;
        let listing: Listing = serde_json::from_str(&body).map_err(RemoteError::from)?;

        debug!(page, count = listing.posts.len(), "candidate page fetched");
        Ok(listing.posts)
    }
}

#[async_trait]
impl PublishTarget for RemoteClient {
    async fn vote(&self, post_id: i64, up: bool) -> Result<()> {
        let url = self.url(&format!("/posts/{post_id}/votes.json"));
        let score = if up { "1" } else { "-1" };

        self.send(|| {
            self.http_client
                .post(&url)
                .query(&[("no_unvote", "true"), ("score", score)])
        })
        .await?;
        Ok(())
    }

    async fn favorite(&self, post_id: i64) -> Result<()> {
        let url = self.url("/favorites.json");
        let id = post_id.to_string();

        match self
            .send(|| self.http_client.post(&url).query(&[("post_id", id.as_str())]))
            .await
        {
            Ok(_) => Ok(()),
            // Already favorited
            Err(RemoteError::Rejected(status, _)) if status.as_u16() == 422 => {
                debug!(post_id, "already favorited");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn unfavorite(&self, post_id: i64) -> Result<()> {
        let url = self.url(&format!("/favorites/{post_id}.json"));

        match self.send(|| self.http_client.delete(&url)).await {
            Ok(_) => Ok(()),
            // Not favorited
            Err(RemoteError::NotFound) => {
                debug!(post_id, "not favorited");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
