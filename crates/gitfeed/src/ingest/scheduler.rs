//! The polling scheduler.
//!
//! A single-owner object with an explicit `start()`/`stop()` lifecycle.
//! Each tick asks the backend whether polling is enabled, enumerates
//! every author page by page, and dispatches one bounded-concurrency
//! ingestion run per author with a usable GitHub profile. A failed tick
//! never cancels the timer; the next tick is the sole recovery
//! mechanism.

use std::sync::Arc;

use tokio::sync::{Semaphore, watch};
use tokio::task::JoinHandle;

use crate::backend::BackendClient;
use crate::github::{GitHubFetcher, username_from_profile};

use super::progress::{IngestProgress, ProgressCallback, emit};
use super::types::{AUTHOR_PAGE_SIZE, DEFAULT_AUTHOR_CONCURRENCY, POLL_INTERVAL, TickReport};
use super::worker::ingest_author;

/// Tunables for the scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerOptions {
    /// Interval between ticks.
    pub interval: std::time::Duration,
    /// Author listing page size.
    pub page_size: usize,
    /// Maximum author pipelines in flight at once.
    pub author_concurrency: usize,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            interval: POLL_INTERVAL,
            page_size: AUTHOR_PAGE_SIZE,
            author_concurrency: DEFAULT_AUTHOR_CONCURRENCY,
        }
    }
}

/// Periodic driver of the ingestion pipeline.
pub struct PollingScheduler {
    backend: Arc<BackendClient>,
    fetcher: Arc<GitHubFetcher>,
    options: SchedulerOptions,
    on_progress: Option<ProgressCallback>,
}

impl PollingScheduler {
    pub fn new(
        backend: Arc<BackendClient>,
        fetcher: Arc<GitHubFetcher>,
        options: SchedulerOptions,
    ) -> Self {
        Self {
            backend,
            fetcher,
            options,
            on_progress: None,
        }
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    /// Run one polling tick to completion.
    ///
    /// Holds no state between invocations: authors are fetched fresh,
    /// and idempotence across ticks rests entirely on the backend's
    /// duplicate check.
    pub async fn run_tick(&self) -> TickReport {
        let mut report = TickReport::default();
        emit(self.on_progress.as_ref(), IngestProgress::TickStarted);

        match self.backend.polling_enabled().await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!("polling disabled, skipping tick");
                emit(self.on_progress.as_ref(), IngestProgress::PollingDisabled);
                return report;
            }
            Err(e) => {
                tracing::warn!(error = %e, "polling status check failed, skipping tick");
                report.errors.push(format!("polling status: {e}"));
                return report;
            }
        }

        let authors = match self
            .backend
            .all_authors(self.options.page_size, self.on_progress.as_ref())
            .await
        {
            Ok(authors) => authors,
            Err(e) => {
                // The author set for this tick is unknown; nothing
                // else can run. The timer itself is unaffected.
                tracing::warn!(error = %e, "author enumeration failed, aborting tick");
                emit(
                    self.on_progress.as_ref(),
                    IngestProgress::PaginationFailed {
                        error: e.to_string(),
                    },
                );
                report.pagination_failed = true;
                report.errors.push(format!("author pagination: {e}"));
                return report;
            }
        };

        let semaphore = Arc::new(Semaphore::new(self.options.author_concurrency));
        let mut handles = Vec::new();

        for author in authors {
            let Some(username) = username_from_profile(&author.github) else {
                report.authors_skipped += 1;
                continue;
            };
            let username = username.to_string();

            let backend = Arc::clone(&self.backend);
            let fetcher = Arc::clone(&self.fetcher);
            let on_progress = self.on_progress.clone();
            let semaphore = Arc::clone(&semaphore);
            let author_id = author.id;

            handles.push(tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return Default::default();
                };
                ingest_author(&backend, &fetcher, &username, &author_id, on_progress.as_ref())
                    .await
            }));
        }

        // Join every author pipeline before the tick is complete.
        for handle in handles {
            match handle.await {
                Ok(author_report) => report.absorb_author(author_report),
                Err(e) => {
                    tracing::warn!(error = %e, "author task panicked");
                    report.errors.push(format!("author task: {e}"));
                }
            }
        }

        emit(
            self.on_progress.as_ref(),
            IngestProgress::TickComplete {
                authors: report.authors_ingested,
                published: report.published,
                duplicates: report.duplicates,
                failed: report.failed,
            },
        );

        report
    }

    /// Start the recurring timer: one tick immediately, then one every
    /// `interval`. Returns a handle whose `stop()` lets the in-flight
    /// tick finish before the task exits.
    #[must_use]
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.options.interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    _ = shutdown_rx.changed() => break,
                }

                // A tick always runs to completion; shutdown is
                // observed at the next loop iteration.
                let report = self.run_tick().await;
                tracing::debug!(
                    authors = report.authors_ingested,
                    published = report.published,
                    duplicates = report.duplicates,
                    failed = report.failed,
                    "tick complete"
                );
            }
        });

        SchedulerHandle { shutdown_tx, task }
    }
}

/// Handle to a started scheduler.
pub struct SchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signal shutdown and wait for the scheduler task to exit. Any
    /// tick already running finishes first.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "scheduler task did not exit cleanly");
        }
    }
}
