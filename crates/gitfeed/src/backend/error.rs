//! Backend API error types.

use thiserror::Error;

use crate::http::HttpError;

/// Errors from the post-sharing backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("backend returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The backend rejected a post creation; the error body is kept
    /// for operator diagnosis.
    #[error("backend rejected post creation with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("failed to decode backend response from {url}: {message}")]
    Decode { url: String, message: String },
}
