//! GitHub activity fetching for the ingestion pipeline.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - [`types`] - Wire types and the normalized [`Activity`] item
//! - [`profile`] - Strict profile URL validation
//! - [`fetcher`] - The unauthenticated two-endpoint fetcher

mod error;
mod fetcher;
mod profile;
mod types;

pub use error::GitHubError;
pub use fetcher::{DEFAULT_API_BASE, GitHubFetcher};
pub use profile::username_from_profile;
pub use types::{Activity, EventActor, EventRepo, PublicEvent, StarredRepo, WatchEvent};
