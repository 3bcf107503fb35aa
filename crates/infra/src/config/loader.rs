//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the review mailbox is not set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `REVIEWBOT_REVIEW_USER_ID`: Mailbox whose calendar is watched (required)
//! - `REVIEWBOT_GRAPH_BASE_URL`: Graph API base URL
//! - `REVIEWBOT_TENANT_ID`, `REVIEWBOT_CLIENT_ID`, `REVIEWBOT_CLIENT_SECRET`:
//!   App registration used for the client credentials flow
//! - `REVIEWBOT_ACCESS_TOKEN`: Pre-issued bearer token
//! - `REVIEWBOT_HTTP_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `REVIEWBOT_HTTP_MAX_ATTEMPTS`: Attempts per HTTP call
//! - `REVIEWBOT_BIND_ADDRESS`: Listen address of the HTTP server
//! - `REVIEWBOT_NOTIFICATION_URL`: Public webhook URL for the subscription
//! - `REVIEWBOT_CLIENT_STATE`: Shared secret echoed in notifications
//! - `REVIEWBOT_SUBSCRIPTION_RENEW`: Whether to renew the subscription (true/false)
//! - `REVIEWBOT_RENEWAL_CRON`: Renewal schedule (cron with seconds)
//! - `REVIEWBOT_OPENAI_API_KEY`, `REVIEWBOT_OPENAI_MODEL`, `REVIEWBOT_OPENAI_API_URL`
//! - `REVIEWBOT_AUTO_ACCEPT`: Accept invitations of tracked meetings (true/false)
//! - `REVIEWBOT_PLANNER_PLAN_ID`, `REVIEWBOT_PLANNER_BUCKET_ID`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./reviewbot.json` or `./reviewbot.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Utc;
use reviewbot_domain::{
    Config, GraphConfig, PublishingConfig, Result, ReviewBotError, ServerConfig,
    SubscriptionConfig, SummarizerConfig,
};

use crate::scheduling::check_renewal_schedule;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the required
/// variable is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `ReviewBotError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `ReviewBotError::Config` if `REVIEWBOT_REVIEW_USER_ID` is missing
/// or a numeric variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Load configuration through an arbitrary variable lookup.
///
/// Unset optional variables keep their defaults; empty values count as unset.
pub fn load_from_lookup<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| {
        lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
    };

    let review_user_id = var("REVIEWBOT_REVIEW_USER_ID").ok_or_else(|| {
        ReviewBotError::Config(
            "Missing required environment variable: REVIEWBOT_REVIEW_USER_ID".to_string(),
        )
    })?;

    let graph_defaults = GraphConfig::default();
    let graph = GraphConfig {
        base_url: var("REVIEWBOT_GRAPH_BASE_URL").unwrap_or(graph_defaults.base_url),
        review_user_id,
        tenant_id: var("REVIEWBOT_TENANT_ID"),
        client_id: var("REVIEWBOT_CLIENT_ID"),
        client_secret: var("REVIEWBOT_CLIENT_SECRET"),
        access_token: var("REVIEWBOT_ACCESS_TOKEN"),
        request_timeout_secs: parse_var(
            "REVIEWBOT_HTTP_TIMEOUT_SECS",
            var("REVIEWBOT_HTTP_TIMEOUT_SECS"),
            graph_defaults.request_timeout_secs,
        )?,
        max_attempts: parse_var(
            "REVIEWBOT_HTTP_MAX_ATTEMPTS",
            var("REVIEWBOT_HTTP_MAX_ATTEMPTS"),
            graph_defaults.max_attempts,
        )?,
    };

    let server = ServerConfig {
        bind_address: var("REVIEWBOT_BIND_ADDRESS")
            .unwrap_or_else(|| ServerConfig::default().bind_address),
    };

    let subscription_defaults = SubscriptionConfig::default();
    let subscription = SubscriptionConfig {
        notification_url: var("REVIEWBOT_NOTIFICATION_URL"),
        client_state: var("REVIEWBOT_CLIENT_STATE"),
        renew: parse_bool(var("REVIEWBOT_SUBSCRIPTION_RENEW"), subscription_defaults.renew),
        renewal_cron: var("REVIEWBOT_RENEWAL_CRON").unwrap_or(subscription_defaults.renewal_cron),
    };

    let summarizer_defaults = SummarizerConfig::default();
    let summarizer = SummarizerConfig {
        api_key: var("REVIEWBOT_OPENAI_API_KEY"),
        model: var("REVIEWBOT_OPENAI_MODEL").unwrap_or(summarizer_defaults.model),
        api_url: var("REVIEWBOT_OPENAI_API_URL").unwrap_or(summarizer_defaults.api_url),
    };

    let publishing = PublishingConfig {
        auto_accept: parse_bool(var("REVIEWBOT_AUTO_ACCEPT"), false),
        planner_plan_id: var("REVIEWBOT_PLANNER_PLAN_ID"),
        planner_bucket_id: var("REVIEWBOT_PLANNER_BUCKET_ID"),
    };

    let config = Config { graph, server, subscription, summarizer, publishing };
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ReviewBotError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The review mailbox is empty
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ReviewBotError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ReviewBotError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ReviewBotError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    if config.graph.review_user_id.trim().is_empty() {
        return Err(ReviewBotError::Config("graph.review_user_id must be set".to_string()));
    }
    validate(&config)?;

    Ok(config)
}

/// Reject settings that cannot work at runtime.
///
/// A renewal schedule must fire within every subscription window, otherwise
/// the subscription lapses between renewals.
fn validate(config: &Config) -> Result<()> {
    let subscription = &config.subscription;
    if subscription.renew {
        check_renewal_schedule(&subscription.renewal_cron, Utc::now())
            .map_err(|err| ReviewBotError::Config(err.to_string()))?;
    }
    Ok(())
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ReviewBotError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ReviewBotError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ReviewBotError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("reviewbot.json"),
        dir.join("reviewbot.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
    ]
}

fn parse_var<T>(key: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| ReviewBotError::Config(format!("Invalid value for {}: {}", key, e))),
        None => Ok(default),
    }
}

/// Parse a boolean flag
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
