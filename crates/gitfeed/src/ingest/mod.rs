//! The ingestion pipeline: scheduling, per-author workers, and the
//! activity-to-post transform.

pub mod progress;
pub mod scheduler;
pub mod transform;
pub mod types;
pub mod worker;

pub use progress::{IngestProgress, ProgressCallback};
pub use scheduler::{PollingScheduler, SchedulerHandle, SchedulerOptions};
pub use transform::{NO_DESCRIPTION_FALLBACK, post_for_activity};
pub use types::{
    AUTHOR_PAGE_SIZE, ActivitySource, AuthorReport, DEFAULT_AUTHOR_CONCURRENCY,
    DEFAULT_REQUEST_TIMEOUT, POLL_INTERVAL, TickReport,
};
pub use worker::ingest_author;
