//! Periodic ingestion of GitHub activity into a post-sharing backend.
//!
//! The pipeline polls the backend for an enablement flag, enumerates
//! every author, fetches each linked GitHub account's starred
//! repositories and public watch events, and publishes one post per
//! novel activity item. All network access goes through the
//! [`http::HttpTransport`] seam so the whole pipeline runs against a
//! mock in tests.

pub mod backend;
pub mod github;
pub mod http;
pub mod ingest;

pub use backend::{Author, BackendClient, BackendError, CreatedPost, PostPayload, Visibility};
pub use github::{Activity, GitHubError, GitHubFetcher, StarredRepo, WatchEvent};
pub use http::{HttpError, HttpTransport, ReqwestTransport};
pub use ingest::{
    IngestProgress, PollingScheduler, ProgressCallback, SchedulerHandle, SchedulerOptions,
    TickReport,
};
