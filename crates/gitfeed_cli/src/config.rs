//! Configuration file support for gitfeed.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `GITFEED_`, e.g., `GITFEED_BACKEND_URL`)
//! 3. Config file (~/.config/gitfeed/config.toml or ./gitfeed.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [backend]
//! url = "https://posts.example.com/app"
//! token = "..."  # CSRF token, or use GITFEED_BACKEND_TOKEN env var
//!
//! [github]
//! base = "https://api.github.com"  # optional, this is the default
//!
//! [poll]
//! interval = 600     # seconds between ticks
//! size = 50          # author page size
//! concurrency = 8    # concurrent author pipelines
//! timeout = 30       # per-request timeout in seconds
//! ```

use std::path::PathBuf;
use std::time::Duration;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use gitfeed::ingest::{
    AUTHOR_PAGE_SIZE, DEFAULT_AUTHOR_CONCURRENCY, DEFAULT_REQUEST_TIMEOUT, POLL_INTERVAL,
};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend configuration.
    pub backend: BackendConfig,
    /// GitHub API configuration.
    pub github: GitHubConfig,
    /// Polling schedule configuration.
    pub poll: PollConfig,
}

/// Backend configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the post-sharing backend.
    /// Can also be set via GITFEED_BACKEND_URL environment variable.
    pub url: Option<String>,
    /// CSRF token sent with mutating requests.
    /// Can also be set via GITFEED_BACKEND_TOKEN environment variable.
    pub token: Option<String>,
}

/// GitHub API configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API base URL. Defaults to the public API.
    /// Can also be set via GITFEED_GITHUB_BASE environment variable.
    pub base: Option<String>,
}

/// Polling schedule configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Seconds between polling ticks.
    pub interval: u64,
    /// Author listing page size.
    pub size: usize,
    /// Maximum concurrent author pipelines.
    pub concurrency: usize,
    /// Per-request timeout in seconds.
    pub timeout: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: POLL_INTERVAL.as_secs(),
            size: AUTHOR_PAGE_SIZE,
            concurrency: DEFAULT_AUTHOR_CONCURRENCY,
            timeout: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/gitfeed/config.toml)
    /// 3. Local config file (./gitfeed.toml)
    /// 4. Environment variables with GITFEED_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(proj_dirs) = ProjectDirs::from("", "", "gitfeed") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        // Local config file takes priority over the XDG one
        let local_config = PathBuf::from("gitfeed.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./gitfeed.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // e.g. GITFEED_BACKEND_URL -> backend.url
        builder = builder.add_source(
            Environment::with_prefix("GITFEED")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll.interval)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.poll.timeout)
    }

    /// Get the default config file path.
    #[allow(dead_code)]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gitfeed").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.backend.url.is_none());
        assert!(config.backend.token.is_none());
        assert!(config.github.base.is_none());
        assert_eq!(config.poll.interval, 600);
        assert_eq!(config.poll.size, 50);
        assert_eq!(config.poll.concurrency, 8);
        assert_eq!(config.poll.timeout, 30);
    }

    #[test]
    fn test_config_builder_with_toml_string() {
        let toml_content = r#"
            [backend]
            url = "https://posts.example.com/app"
            token = "tok123"

            [poll]
            interval = 120
            concurrency = 4
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(
            config.backend.url,
            Some("https://posts.example.com/app".to_string())
        );
        assert_eq!(config.backend.token, Some("tok123".to_string()));
        assert_eq!(config.poll.interval, 120);
        assert_eq!(config.poll.concurrency, 4);
        // Unset values fall back to defaults
        assert_eq!(config.poll.size, 50);
    }

    #[test]
    fn test_config_builder_partial_override() {
        let toml_content = r#"
            [poll]
            size = 25
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(config.poll.size, 25);
        assert_eq!(config.poll.interval, 600);
    }

    #[test]
    fn test_config_merging_order() {
        let base_toml = r#"
            [poll]
            interval = 600
            size = 50
        "#;

        let override_toml = r#"
            [poll]
            interval = 60
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(base_toml, FileFormat::Toml))
            .add_source(config::File::from_str(override_toml, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(config.poll.interval, 60);
        assert_eq!(config.poll.size, 50);
    }

    #[test]
    fn test_config_unknown_fields_ignored() {
        let toml_content = r#"
            [poll]
            interval = 600
            unknown_field = "should be ignored"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();
        assert_eq!(config.poll.interval, 600);
    }

    #[test]
    fn test_durations_derive_from_seconds() {
        let config = Config::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(600));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }
}
