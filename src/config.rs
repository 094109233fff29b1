//! Configuration management for the SoulGraph engine
//!
//! Strongly-typed configuration read from environment variables, with
//! validation and sensible defaults.
//!
//! # Example
//! ```no_run
//! use soulgraph::Config;
//! let config = Config::from_env().expect("failed to load config");
//! println!("API URL: {}", config.api.base_url);
//! ```

use crate::error::{Error, Result};
use crate::social::{FeedRanker, RelevanceWeights, SortBy};
use std::time::Duration;
use tracing::{info, warn};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Social API client configuration
    pub api: ApiConfig,
    /// Feed ranking configuration
    pub feed: FeedConfig,
}

/// Social API client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Attempts per call, including the first
    pub max_retries: u32,
    /// Base delay for exponential backoff
    pub retry_delay: Duration,
}

/// Feed ranking configuration
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Ordering used when a request does not name one
    pub default_sort: SortBy,
    /// Weights of the `relevant` blend
    pub relevance: RelevanceWeights,
    /// Ranking passes slower than this are logged as warnings
    pub slow_threshold: Duration,
}

impl FeedConfig {
    /// Ranker configured with these weights and threshold
    pub fn ranker(&self) -> FeedRanker {
        FeedRanker::with_weights(self.relevance).with_slow_threshold(self.slow_threshold)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Platforms that mount secrets as files: each file name is a variable
        // name, its trimmed contents the value. Already-set variables win.
        if let Ok(folder) = std::env::var("SOULGRAPH_ENV_DIR") {
            load_env_dir(&folder);
        } else {
            // Try to load .env file (ignore if not found)
            dotenvy::dotenv().ok();
        }

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.log_summary();
        Ok(config)
    }

    /// Build and validate configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvSource { lookup };

        let config = Self {
            api: ApiConfig {
                base_url: env.required("SOULGRAPH_API_URL")?,
                timeout: Duration::from_millis(env.parsed_or("SOULGRAPH_API_TIMEOUT_MS", 10_000)?),
                max_retries: env.parsed_or("SOULGRAPH_API_MAX_RETRIES", 3)?,
                retry_delay: Duration::from_millis(
                    env.parsed_or("SOULGRAPH_API_RETRY_DELAY_MS", 250)?,
                ),
            },
            feed: FeedConfig {
                default_sort: env.parsed_or("FEED_DEFAULT_SORT", SortBy::Recent)?,
                relevance: RelevanceWeights {
                    engagement: env.parsed_or("FEED_ENGAGEMENT_WEIGHT", 0.7)?,
                    age: env.parsed_or("FEED_AGE_WEIGHT", 0.3)?,
                },
                slow_threshold: Duration::from_millis(env.parsed_or("FEED_SLOW_THRESHOLD_MS", 50)?),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        let url = self.api.base_url.trim();
        if url.is_empty() {
            return Err(Error::InvalidConfig {
                key: "SOULGRAPH_API_URL",
                message: "API URL cannot be empty".into(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::InvalidConfig {
                key: "SOULGRAPH_API_URL",
                message: format!("API URL must be http(s): {}", mask_url(url)).into(),
            });
        }

        if self.api.max_retries == 0 {
            return Err(Error::InvalidConfig {
                key: "SOULGRAPH_API_MAX_RETRIES",
                message: "max_retries must be >= 1".into(),
            });
        }

        for (key, weight) in [
            ("FEED_ENGAGEMENT_WEIGHT", self.feed.relevance.engagement),
            ("FEED_AGE_WEIGHT", self.feed.relevance.age),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidConfig {
                    key,
                    message: format!("weight must be a non-negative number, got {}", weight).into(),
                });
            }
        }

        Ok(())
    }

    /// Log configuration summary (without sensitive data)
    fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  Social API:");
        info!("    Base URL: {}", mask_url(&self.api.base_url));
        info!("    Timeout: {:?}", self.api.timeout);
        info!("    Max Retries: {}", self.api.max_retries);
        info!("  Feed:");
        info!("    Default Sort: {}", self.feed.default_sort);
        info!(
            "    Relevance Weights: engagement={} age={}",
            self.feed.relevance.engagement, self.feed.relevance.age
        );
    }
}

// ============================================================================
// Helper functions
// ============================================================================

struct EnvSource<F> {
    lookup: F,
}

impl<F> EnvSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get required variable
    fn required(&self, key: &'static str) -> Result<String> {
        (self.lookup)(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or(Error::MissingEnvVar { var: key })
    }

    /// Get and parse variable, falling back to `default` when unset
    fn parsed_or<T>(&self, key: &'static str, default: T) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match (self.lookup)(key) {
            None => Ok(default),
            Some(value) => value.trim().parse().map_err(|e: T::Err| Error::InvalidConfig {
                key,
                message: format!("Invalid value '{}': {}", value, e).into(),
            }),
        }
    }
}

fn load_env_dir(folder: &str) {
    let entries = match std::fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("Failed to read SOULGRAPH_ENV_DIR {}: {}", folder, err);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if std::env::var(&name).is_ok() {
            continue;
        }
        if let Ok(contents) = std::fs::read_to_string(&path) {
            std::env::set_var(&name, contents.trim());
        }
    }
    info!("Loaded configuration from SOULGRAPH_ENV_DIR={}", folder);
}

/// Mask sensitive parts of URL
fn mask_url(url: &str) -> String {
    // Mask password if present
    if let Some(at_pos) = url.find('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            let (before, after) = url.split_at(colon_pos + 1);
            let (_, rest) = after.split_at(at_pos - colon_pos - 1);
            return format!("{}****{}", before, rest);
        }
    }
    url.to_string()
}
