//! Gitfeed CLI - runs the GitHub activity ingestion pipeline.

mod config;
mod progress;
mod shutdown;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::Term;
use gitfeed::ingest::{PollingScheduler, ProgressCallback, SchedulerOptions};
use gitfeed::{BackendClient, GitHubFetcher, HttpTransport, ReqwestTransport};
use tracing_subscriber::EnvFilter;

use crate::progress::LoggingReporter;

#[derive(Parser)]
#[command(name = "gitfeed")]
#[command(version)]
#[command(about = "Mirrors GitHub activity into a post-sharing backend")]
#[command(
    long_about = "Gitfeed periodically polls a post-sharing backend for its authors, fetches \
each linked GitHub account's starred repositories and public watch events, and \
publishes one post per novel activity item."
)]
#[command(after_long_help = r#"EXAMPLES
    Run the polling daemon:
        $ gitfeed run

    Run a single ingestion pass and exit:
        $ gitfeed tick

CONFIGURATION
    Gitfeed reads configuration from:
      1. ~/.config/gitfeed/config.toml (or $XDG_CONFIG_HOME/gitfeed/config.toml)
      2. ./gitfeed.toml in the current directory
      3. Environment variables (GITFEED_* prefix)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    GITFEED_BACKEND_URL       Base URL of the post-sharing backend
    GITFEED_BACKEND_TOKEN     CSRF token for mutating backend requests
    GITFEED_GITHUB_BASE       GitHub API base (default: https://api.github.com)
    GITFEED_POLL_INTERVAL     Seconds between ticks (default: 600)
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the polling daemon until interrupted
    Run {
        #[command(flatten)]
        options: CommonOptions,
    },
    /// Run a single ingestion tick and exit
    Tick {
        #[command(flatten)]
        options: CommonOptions,
    },
}

/// Options shared by both commands. Flags override the config file.
#[derive(Debug, Clone, clap::Args)]
struct CommonOptions {
    /// Backend base URL (overrides config)
    #[arg(short = 'b', long)]
    backend_url: Option<String>,

    /// Seconds between polling ticks (default from config or 600)
    #[arg(short = 'i', long)]
    interval_secs: Option<u64>,

    /// Maximum concurrent author pipelines (default from config or 8)
    #[arg(short = 'c', long)]
    concurrency: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("gitfeed=info,gitfeed_cli=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    // Config file -> env vars -> CLI flags
    let config = config::Config::load();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { options } => handle_run(&config, &options).await,
        Commands::Tick { options } => handle_tick(&config, &options).await,
    }
}

async fn handle_run(
    config: &config::Config,
    options: &CommonOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = build_scheduler(config, options)?;
    let interval = scheduler_interval(config, options);

    tracing::info!(interval_secs = interval.as_secs(), "Starting polling daemon");
    let handle = scheduler.start();

    shutdown::wait_for_shutdown().await;

    handle.stop().await;
    tracing::info!("Daemon stopped");
    Ok(())
}

async fn handle_tick(
    config: &config::Config,
    options: &CommonOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = build_scheduler(config, options)?;
    let report = scheduler.run_tick().await;

    let term = Term::stdout();
    if term.is_term() {
        println!(
            "authors: {}  published: {}  duplicates: {}  failed: {}",
            report.authors_ingested, report.published, report.duplicates, report.failed
        );
        for error in &report.errors {
            eprintln!("error: {error}");
        }
    }

    if report.pagination_failed {
        return Err("author enumeration failed".into());
    }
    Ok(())
}

fn build_scheduler(
    config: &config::Config,
    options: &CommonOptions,
) -> Result<PollingScheduler, Box<dyn std::error::Error>> {
    let base_url = options
        .backend_url
        .clone()
        .or_else(|| config.backend.url.clone())
        .ok_or("backend base URL not configured (set backend.url or GITFEED_BACKEND_URL)")?;
    let csrf_token = config
        .backend
        .token
        .clone()
        .ok_or("backend CSRF token not configured (set backend.token or GITFEED_BACKEND_TOKEN)")?;

    let transport: Arc<dyn HttpTransport> =
        Arc::new(ReqwestTransport::with_timeout(config.request_timeout())?);

    let backend = Arc::new(BackendClient::new(
        Arc::clone(&transport),
        base_url,
        csrf_token,
    ));
    let fetcher = Arc::new(match &config.github.base {
        Some(api_base) => GitHubFetcher::with_api_base(transport, api_base),
        None => GitHubFetcher::new(transport),
    });

    let scheduler_options = SchedulerOptions {
        interval: scheduler_interval(config, options),
        page_size: config.poll.size,
        author_concurrency: options.concurrency.unwrap_or(config.poll.concurrency),
    };

    let reporter = LoggingReporter::new();
    let on_progress: ProgressCallback = Arc::new(move |event| reporter.handle(event));

    Ok(PollingScheduler::new(backend, fetcher, scheduler_options).with_progress(on_progress))
}

fn scheduler_interval(config: &config::Config, options: &CommonOptions) -> std::time::Duration {
    options
        .interval_secs
        .map(std::time::Duration::from_secs)
        .unwrap_or_else(|| config.poll_interval())
}
