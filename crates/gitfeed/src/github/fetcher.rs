//! Unauthenticated GitHub activity fetching.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::error::GitHubError;
use super::types::{PublicEvent, StarredRepo, WatchEvent};
use crate::http::{HttpRequest, HttpTransport};

/// Default base URL for the GitHub REST API.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Fetches public activity for a single GitHub username.
///
/// Both endpoints are hit with a single unauthenticated GET per call.
/// A non-success status or an undecodable body yields a [`GitHubError`]
/// that the caller treats as "no activity this tick" for that source.
#[derive(Clone)]
pub struct GitHubFetcher {
    transport: Arc<dyn HttpTransport>,
    api_base: String,
}

impl GitHubFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_api_base(transport, DEFAULT_API_BASE)
    }

    /// Point the fetcher at a different API base (tests, proxies).
    pub fn with_api_base(transport: Arc<dyn HttpTransport>, api_base: impl Into<String>) -> Self {
        Self {
            transport,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the repositories starred by `username`.
    pub async fn fetch_starred(&self, username: &str) -> Result<Vec<StarredRepo>, GitHubError> {
        let url = format!("{}/users/{}/starred", self.api_base, username);
        self.get_json(&url).await
    }

    /// Fetch `username`'s public events, keeping only watch events.
    ///
    /// The events endpoint returns heterogeneous event kinds; the
    /// filter lives here so nothing downstream sees other kinds.
    pub async fn fetch_watch_events(&self, username: &str) -> Result<Vec<WatchEvent>, GitHubError> {
        let url = format!("{}/users/{}/events/public", self.api_base, username);
        let events: Vec<PublicEvent> = self.get_json(&url).await?;
        Ok(events
            .into_iter()
            .filter_map(PublicEvent::into_watch_event)
            .collect())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GitHubError> {
        let request = HttpRequest::get(url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "gitfeed");

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(GitHubError::Status {
                status: response.status,
                url: url.to_string(),
            });
        }

        serde_json::from_str(&response.body).map_err(|e| GitHubError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
