//! GitHub API error types.

use thiserror::Error;

use crate::http::HttpError;

/// Errors that can occur when fetching activity from the GitHub API.
///
/// Callers treat any of these as "no activity this tick" for the
/// affected source; they never abort sibling work.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("GitHub returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to decode GitHub response from {url}: {message}")]
    Decode { url: String, message: String },
}
