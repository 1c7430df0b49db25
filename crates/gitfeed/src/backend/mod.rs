//! Client for the post-sharing backend.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for backend operations
//! - [`types`] - Wire types: authors, polling status, post payloads
//! - [`client`] - The backend REST client

mod client;
mod error;
mod types;

pub use client::BackendClient;
pub use error::BackendError;
pub use types::{Author, CreatedPost, PostPayload, Visibility};
