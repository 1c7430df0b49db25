//! Progress reporting for ingestion runs.

use std::sync::Arc;

use super::types::ActivitySource;

/// Progress events emitted during a scheduler tick.
///
/// Events are operator-facing; nothing in the pipeline reacts to them.
#[derive(Debug, Clone)]
pub enum IngestProgress {
    /// A tick began.
    TickStarted,
    /// The backend reported polling disabled; the tick is a no-op.
    PollingDisabled,
    /// One author page was fetched.
    AuthorsPageFetched { page: u32, count: usize },
    /// Author enumeration failed; the remainder of the tick aborts.
    PaginationFailed { error: String },
    /// An author's pipeline started.
    AuthorStarted { username: String },
    /// One activity source failed wholesale for an author.
    SourceFailed {
        username: String,
        source: ActivitySource,
        error: String,
    },
    /// A novel item was published.
    ItemPublished { username: String, title: String },
    /// An item was skipped as a duplicate.
    ItemDuplicate { username: String, title: String },
    /// An item was dropped after a duplicate-check or publish failure.
    ItemFailed {
        username: String,
        title: String,
        error: String,
    },
    /// An author's pipeline completed.
    AuthorComplete {
        username: String,
        published: usize,
        duplicates: usize,
        failed: usize,
    },
    /// The tick completed.
    TickComplete {
        authors: usize,
        published: usize,
        duplicates: usize,
        failed: usize,
    },
}

/// Callback invoked with progress events.
///
/// `Arc` rather than `Box` so the scheduler can hand the callback to
/// spawned per-author tasks.
pub type ProgressCallback = Arc<dyn Fn(IngestProgress) + Send + Sync>;

/// Emit a progress event if a callback is set.
pub fn emit(on_progress: Option<&ProgressCallback>, event: IngestProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn emit_invokes_callback_when_present() {
        let events: Arc<Mutex<Vec<IngestProgress>>> = Arc::new(Mutex::new(Vec::new()));
        let capture = Arc::clone(&events);
        let cb: ProgressCallback = Arc::new(move |event| {
            capture.lock().unwrap_or_else(|e| e.into_inner()).push(event);
        });

        emit(Some(&cb), IngestProgress::TickStarted);
        emit(None, IngestProgress::PollingDisabled);

        let events = events.lock().unwrap_or_else(|e| e.into_inner());
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], IngestProgress::TickStarted));
    }
}
