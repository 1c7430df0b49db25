//! Per-author ingestion.
//!
//! One worker run covers one author's two activity sources. Failures
//! are handled at the narrowest possible scope: a failed item or a
//! failed source is counted and logged, and sibling items, the sibling
//! source, and other authors are untouched. There is no in-tick retry;
//! the next tick's fresh fetch re-attempts anything that was dropped,
//! and the duplicate check absorbs re-attempts of anything that made
//! it through.

use crate::backend::{BackendClient, PostPayload};
use crate::github::{Activity, GitHubFetcher};

use super::progress::{IngestProgress, ProgressCallback, emit};
use super::transform::post_for_activity;
use super::types::{ActivitySource, AuthorReport};

/// Run the fetch → transform → dedup-check → publish pipeline for one
/// author's starred repos and watch events.
///
/// The two sources share no mutable state and run concurrently; both
/// are joined before the author is considered complete.
pub async fn ingest_author(
    backend: &BackendClient,
    fetcher: &GitHubFetcher,
    username: &str,
    author_id: &str,
    on_progress: Option<&ProgressCallback>,
) -> AuthorReport {
    emit(
        on_progress,
        IngestProgress::AuthorStarted {
            username: username.to_string(),
        },
    );

    let (mut report, events_report) = tokio::join!(
        ingest_starred(backend, fetcher, username, author_id, on_progress),
        ingest_events(backend, fetcher, username, author_id, on_progress),
    );
    report.absorb(events_report);

    emit(
        on_progress,
        IngestProgress::AuthorComplete {
            username: username.to_string(),
            published: report.published,
            duplicates: report.duplicates,
            failed: report.failed,
        },
    );

    report
}

async fn ingest_starred(
    backend: &BackendClient,
    fetcher: &GitHubFetcher,
    username: &str,
    author_id: &str,
    on_progress: Option<&ProgressCallback>,
) -> AuthorReport {
    let mut report = AuthorReport::default();

    let repos = match fetcher.fetch_starred(username).await {
        Ok(repos) => repos,
        Err(e) => {
            source_failed(&mut report, username, ActivitySource::Starred, &e, on_progress);
            return report;
        }
    };

    for repo in repos {
        publish_item(
            backend,
            &Activity::Starred(repo),
            username,
            author_id,
            on_progress,
            &mut report,
        )
        .await;
    }

    report
}

async fn ingest_events(
    backend: &BackendClient,
    fetcher: &GitHubFetcher,
    username: &str,
    author_id: &str,
    on_progress: Option<&ProgressCallback>,
) -> AuthorReport {
    let mut report = AuthorReport::default();

    let events = match fetcher.fetch_watch_events(username).await {
        Ok(events) => events,
        Err(e) => {
            source_failed(&mut report, username, ActivitySource::Events, &e, on_progress);
            return report;
        }
    };

    for event in events {
        publish_item(
            backend,
            &Activity::Watch(event),
            username,
            author_id,
            on_progress,
            &mut report,
        )
        .await;
    }

    report
}

fn source_failed(
    report: &mut AuthorReport,
    username: &str,
    source: ActivitySource,
    error: &dyn std::fmt::Display,
    on_progress: Option<&ProgressCallback>,
) {
    let message = format!("{username}/{}: {error}", source.as_str());
    tracing::warn!(username, source = source.as_str(), %error, "activity fetch failed");
    emit(
        on_progress,
        IngestProgress::SourceFailed {
            username: username.to_string(),
            source,
            error: error.to_string(),
        },
    );
    report.failed += 1;
    report.errors.push(message);
}

/// Drive one activity item through its terminal state: `Duplicate`,
/// `Published`, or dropped after a failure.
async fn publish_item(
    backend: &BackendClient,
    activity: &Activity,
    username: &str,
    author_id: &str,
    on_progress: Option<&ProgressCallback>,
    report: &mut AuthorReport,
) {
    let payload = post_for_activity(activity, author_id);

    // Never publish when duplicate status is unknown.
    match backend.post_exists(&payload).await {
        Ok(true) => {
            tracing::debug!(username, title = %payload.title, "duplicate post exists, skipping");
            emit(
                on_progress,
                IngestProgress::ItemDuplicate {
                    username: username.to_string(),
                    title: payload.title.clone(),
                },
            );
            report.duplicates += 1;
        }
        Ok(false) => publish_novel(backend, &payload, username, author_id, on_progress, report).await,
        Err(e) => {
            item_failed(report, username, &payload, &e, "duplicate check failed", on_progress);
        }
    }
}

async fn publish_novel(
    backend: &BackendClient,
    payload: &PostPayload,
    username: &str,
    author_id: &str,
    on_progress: Option<&ProgressCallback>,
    report: &mut AuthorReport,
) {
    match backend.create_post(author_id, payload).await {
        Ok(_created) => {
            tracing::info!(username, title = %payload.title, "post published");
            emit(
                on_progress,
                IngestProgress::ItemPublished {
                    username: username.to_string(),
                    title: payload.title.clone(),
                },
            );
            report.published += 1;
        }
        Err(e) => {
            item_failed(report, username, payload, &e, "publish failed", on_progress);
        }
    }
}

fn item_failed(
    report: &mut AuthorReport,
    username: &str,
    payload: &PostPayload,
    error: &dyn std::fmt::Display,
    what: &str,
    on_progress: Option<&ProgressCallback>,
) {
    tracing::warn!(username, title = %payload.title, %error, "{what}, dropping item");
    emit(
        on_progress,
        IngestProgress::ItemFailed {
            username: username.to_string(),
            title: payload.title.clone(),
            error: error.to_string(),
        },
    );
    report.failed += 1;
    report.errors.push(format!("{username}: {}: {error}", payload.title));
}
