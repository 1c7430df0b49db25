//! Shared ingestion types and constants.

use std::time::Duration;

/// Interval between scheduler ticks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(600);

/// Page size used when enumerating authors.
pub const AUTHOR_PAGE_SIZE: usize = 50;

/// Maximum author pipelines in flight per tick.
pub const DEFAULT_AUTHOR_CONCURRENCY: usize = 8;

/// Per-request deadline for the production HTTP transport.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The two independent activity sources ingested per author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivitySource {
    Starred,
    Events,
}

impl ActivitySource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActivitySource::Starred => "starred",
            ActivitySource::Events => "events",
        }
    }
}

/// Outcome counters for one author's ingestion run.
///
/// Failures are non-fatal by design: a failed item or source is
/// counted and logged, never propagated.
#[derive(Debug, Default)]
pub struct AuthorReport {
    /// Posts created on the backend.
    pub published: usize,
    /// Items skipped because an equivalent post already exists.
    pub duplicates: usize,
    /// Items dropped: fetch, duplicate-check, or publish failures.
    pub failed: usize,
    /// Messages for the failures above.
    pub errors: Vec<String>,
}

impl AuthorReport {
    /// Fold the sibling source's counters into this report.
    pub fn absorb(&mut self, other: AuthorReport) {
        self.published += other.published;
        self.duplicates += other.duplicates;
        self.failed += other.failed;
        self.errors.extend(other.errors);
    }
}

/// Outcome counters for one scheduler tick.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Authors whose GitHub profile parsed and whose pipeline ran.
    pub authors_ingested: usize,
    /// Authors skipped for a missing or malformed GitHub URL.
    pub authors_skipped: usize,
    /// Whether author enumeration failed before the set was known.
    pub pagination_failed: bool,
    pub published: usize,
    pub duplicates: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl TickReport {
    /// Fold one author's outcome into the tick totals.
    pub fn absorb_author(&mut self, report: AuthorReport) {
        self.authors_ingested += 1;
        self.published += report.published;
        self.duplicates += report.duplicates;
        self.failed += report.failed;
        self.errors.extend(report.errors);
    }
}
