//! GitHub API data types.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

/// A repository entry from `GET /users/{username}/starred`.
#[derive(Debug, Clone, Deserialize)]
pub struct StarredRepo {
    pub name: String,
    pub html_url: String,
    /// Repository description; absent or null for many repos.
    #[serde(default)]
    pub description: Option<String>,
}

/// One entry from `GET /users/{username}/events/public`.
///
/// The endpoint returns heterogeneous event kinds; only `WatchEvent`
/// entries are forwarded downstream, so this type keeps just the
/// fields that conversion needs.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub actor: EventActor,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventActor {
    pub display_login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRepo {
    pub name: String,
    pub url: String,
}

impl PublicEvent {
    /// Convert to a [`WatchEvent`] if this is one; all other event
    /// kinds are dropped at this stage.
    #[must_use]
    pub fn into_watch_event(self) -> Option<WatchEvent> {
        if self.kind != "WatchEvent" {
            return None;
        }
        Some(WatchEvent {
            actor_display_login: self.actor.display_login,
            repo_name: self.repo.name,
            repo_url: self.repo.url,
            created_at: self.created_at,
        })
    }
}

/// A normalized watch (star) event.
#[derive(Debug, Clone)]
pub struct WatchEvent {
    pub actor_display_login: String,
    pub repo_name: String,
    pub repo_url: String,
    pub created_at: DateTime<Utc>,
}

impl WatchEvent {
    /// The event timestamp in GitHub's wire format (`2024-01-01T00:00:00Z`).
    #[must_use]
    pub fn created_at_str(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// One GitHub activity item, the atomic unit of the ingestion pipeline.
#[derive(Debug, Clone)]
pub enum Activity {
    Starred(StarredRepo),
    Watch(WatchEvent),
}
