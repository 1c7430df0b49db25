use gitfeed::IngestProgress;

/// Progress reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: IngestProgress) {
        match event {
            IngestProgress::TickStarted => {
                tracing::info!("Tick started");
            }

            IngestProgress::PollingDisabled => {
                tracing::info!("Polling disabled, skipping tick");
            }

            IngestProgress::AuthorsPageFetched { page, count } => {
                tracing::debug!(page, count, "Fetched author page");
            }

            IngestProgress::PaginationFailed { error } => {
                tracing::error!(error = %error, "Author enumeration failed");
            }

            IngestProgress::AuthorStarted { username } => {
                tracing::debug!(username = %username, "Ingesting author");
            }

            IngestProgress::SourceFailed {
                username,
                source,
                error,
            } => {
                tracing::warn!(
                    username = %username,
                    source = source.as_str(),
                    error = %error,
                    "Activity source failed"
                );
            }

            IngestProgress::ItemPublished { username, title } => {
                tracing::info!(username = %username, title = %title, "Published");
            }

            IngestProgress::ItemDuplicate { username, title } => {
                tracing::debug!(username = %username, title = %title, "Duplicate, skipped");
            }

            IngestProgress::ItemFailed {
                username,
                title,
                error,
            } => {
                tracing::warn!(username = %username, title = %title, error = %error, "Item failed");
            }

            IngestProgress::AuthorComplete {
                username,
                published,
                duplicates,
                failed,
            } => {
                tracing::debug!(
                    username = %username,
                    published,
                    duplicates,
                    failed,
                    "Author complete"
                );
            }

            IngestProgress::TickComplete {
                authors,
                published,
                duplicates,
                failed,
            } => {
                tracing::info!(authors, published, duplicates, failed, "Tick complete");
            }
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
