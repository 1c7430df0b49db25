//! Mapping GitHub activity into post payloads.
//!
//! Pure and total: every activity item maps to exactly one payload,
//! and absent optional fields degrade to fallback text instead of
//! failing.

use crate::backend::PostPayload;
use crate::github::{Activity, StarredRepo, WatchEvent};

/// Content used when a starred repository has no description.
pub const NO_DESCRIPTION_FALLBACK: &str = "No description available";

/// Build the post payload for one activity item.
#[must_use]
pub fn post_for_activity(activity: &Activity, author_id: &str) -> PostPayload {
    match activity {
        Activity::Starred(repo) => post_for_starred(repo, author_id),
        Activity::Watch(event) => post_for_watch(event, author_id),
    }
}

/// Starred repo → `⭐ Starred: {name}` post.
#[must_use]
pub fn post_for_starred(repo: &StarredRepo, author_id: &str) -> PostPayload {
    PostPayload::new(
        format!("⭐ Starred: {}", repo.name),
        format!("👾 Repo: {}", repo.html_url),
        repo.description
            .as_deref()
            .unwrap_or(NO_DESCRIPTION_FALLBACK),
        author_id,
    )
}

/// Watch event → `👀 {actor} started watching {repo}` post.
#[must_use]
pub fn post_for_watch(event: &WatchEvent, author_id: &str) -> PostPayload {
    PostPayload::new(
        format!(
            "👀 {} started watching {}",
            event.actor_display_login, event.repo_name
        ),
        format!("🕙 Started watching at {}", event.created_at_str()),
        format!("Watch Event at {}", event.repo_url),
        author_id,
    )
}
