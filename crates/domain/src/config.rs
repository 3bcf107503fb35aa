//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::GRAPH_API_BASE;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub subscription: SubscriptionConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub publishing: PublishingConfig,
}

/// Microsoft Graph access configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub base_url: String,
    /// Mailbox (user id or UPN) whose calendar is watched.
    pub review_user_id: String,
    pub tenant_id: Option<String>,
    pub client_id: Option<String>,
    #[serde(skip_serializing)]
    pub client_secret: Option<String>,
    /// Pre-issued bearer token, used instead of the client credentials flow.
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub request_timeout_secs: u64,
    /// Total attempts per HTTP call (initial try + transport retries).
    pub max_attempts: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: GRAPH_API_BASE.to_string(),
            review_user_id: String::new(),
            tenant_id: None,
            client_id: None,
            client_secret: None,
            access_token: None,
            request_timeout_secs: 30,
            max_attempts: 3,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_address: "0.0.0.0:7071".to_string() }
    }
}

/// Change-notification subscription configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionConfig {
    /// Public URL of the webhook gateway. No subscription is created when unset.
    pub notification_url: Option<String>,
    #[serde(skip_serializing)]
    pub client_state: Option<String>,
    pub renew: bool,
    /// Cron expression (with seconds) driving subscription renewal.
    pub renewal_cron: String,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            notification_url: None,
            client_state: None,
            renew: true,
            renewal_cron: "0 */30 * * * *".to_string(),
        }
    }
}

/// Outcome extraction (summarizer) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
        }
    }
}

/// Outcome publishing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishingConfig {
    /// Accept unanswered invitations for tracked meetings.
    pub auto_accept: bool,
    pub planner_plan_id: Option<String>,
    pub planner_bucket_id: Option<String>,
}
