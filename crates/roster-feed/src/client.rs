//! Feed client: one HTTP round trip per fetch, no retries.
//!
//! Retry policy belongs to refresh callers; the client's job is to surface
//! a typed error naming the feed that failed.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use roster_core::{AuthorRecord, RoleRecord};

use crate::error::{Feed, FeedError};

/// Capability interface over the two upstream feeds.
///
/// The membership cache refreshes through it and the readiness reporter
/// probes through it, so both can be tested against an in-memory stand-in.
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch all rows of the authors feed.
    async fn fetch_authors(&self) -> Result<Vec<AuthorRecord>, FeedError>;

    /// Fetch all rows of the roles feed.
    async fn fetch_roles(&self) -> Result<Vec<RoleRecord>, FeedError>;

    /// Probe the authors feed: success means reachable and parseable.
    /// Never touches cache state.
    async fn check_authors_connectivity(&self) -> Result<(), FeedError>;

    /// Probe the roles feed: success means reachable and parseable.
    async fn check_roles_connectivity(&self) -> Result<(), FeedError>;
}

/// Configuration for `HttpFeedClient`.
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// Endpoint of the authors feed.
    pub authors_url: Url,
    /// Endpoint of the roles feed.
    pub roles_url: Url,
    /// Per-request timeout (default: 10 seconds).
    pub request_timeout: Duration,
    /// Maximum response size in bytes (default: 8 MB).
    pub max_response_size: usize,
}

impl FeedClientConfig {
    pub fn new(authors_url: Url, roles_url: Url) -> Self {
        Self {
            authors_url,
            roles_url,
            request_timeout: Duration::from_secs(10),
            max_response_size: 8 * 1024 * 1024,
        }
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_response_size(mut self, size: usize) -> Self {
        self.max_response_size = size;
        self
    }
}

/// Reqwest-backed feed client.
pub struct HttpFeedClient {
    http_client: reqwest::Client,
    config: FeedClientConfig,
}

impl HttpFeedClient {
    pub fn new(config: FeedClientConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            config,
        }
    }

    /// One GET round trip, checked and parsed into the feed's record type.
    async fn fetch_records<T: DeserializeOwned>(
        &self,
        feed: Feed,
        url: &Url,
    ) -> Result<Vec<T>, FeedError> {
        let response = self.get_checked(feed, url).await?;

        let records: Vec<T> = response.json().await.map_err(|e| {
            tracing::warn!(feed = %feed, error = %e, "failed to parse feed payload");
            FeedError::malformed(feed, e.to_string())
        })?;

        tracing::debug!(feed = %feed, count = records.len(), "fetched feed");
        Ok(records)
    }

    /// Lightweight probe: the endpoint answered with success and some
    /// parseable JSON. Skips the typed schema on purpose.
    async fn check_connectivity(&self, feed: Feed, url: &Url) -> Result<(), FeedError> {
        let response = self.get_checked(feed, url).await?;

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| FeedError::malformed(feed, e.to_string()))?;
        Ok(())
    }

    async fn get_checked(&self, feed: Feed, url: &Url) -> Result<reqwest::Response, FeedError> {
        let response = self
            .http_client
            .get(url.as_str())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(feed = %feed, error = %e, "failed to reach feed authority");
                FeedError::unavailable(feed, e.to_string())
            })?;

        if !response.status().is_success() {
            return Err(FeedError::status(feed, response.status().as_u16()));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_response_size
        {
            return Err(FeedError::too_large(feed, self.config.max_response_size));
        }

        Ok(response)
    }
}

#[async_trait]
impl FeedSource for HttpFeedClient {
    async fn fetch_authors(&self) -> Result<Vec<AuthorRecord>, FeedError> {
        self.fetch_records(Feed::Authors, &self.config.authors_url)
            .await
    }

    async fn fetch_roles(&self) -> Result<Vec<RoleRecord>, FeedError> {
        self.fetch_records(Feed::Roles, &self.config.roles_url)
            .await
    }

    async fn check_authors_connectivity(&self) -> Result<(), FeedError> {
        self.check_connectivity(Feed::Authors, &self.config.authors_url)
            .await
    }

    async fn check_roles_connectivity(&self) -> Result<(), FeedError> {
        self.check_connectivity(Feed::Roles, &self.config.roles_url)
            .await
    }
}
