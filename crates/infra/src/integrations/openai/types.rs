/// OpenAI API types for meeting outcome extraction
use chrono::NaiveDate;
use reviewbot_domain::{MeetingOutcome, OutcomeTask, ReviewBotError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Summarizer error types
#[derive(Debug, thiserror::Error)]
pub enum SummarizerError {
    /// Network-level error (connection failed, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// OpenAI API returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Rate limit exceeded - should retry after delay
    #[error("Rate limit exceeded (retry after {0}s)")]
    RateLimit(u64),

    /// Authentication failed (invalid API key)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Response body doesn't match expected schema
    #[error("Invalid response schema: {0}")]
    InvalidSchema(String),
}

impl From<SummarizerError> for ReviewBotError {
    fn from(err: SummarizerError) -> Self {
        match err {
            SummarizerError::Network(_) | SummarizerError::RateLimit(_) => {
                ReviewBotError::Network(err.to_string())
            }
            SummarizerError::Authentication(_) => ReviewBotError::Auth(err.to_string()),
            SummarizerError::Api { .. } | SummarizerError::InvalidSchema(_) => {
                ReviewBotError::Provider(err.to_string())
            }
        }
    }
}

/// Internal types for OpenAI Chat Completions API
#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<JsonSchema>,
}

/// JSON schema wrapper used by OpenAI when `response_format = "json_schema"`.
#[derive(Debug, Serialize)]
pub(crate) struct JsonSchema {
    pub name: String,
    pub schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Response from OpenAI Chat Completions API
#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: Message,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Message {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Usage {
    pub total_tokens: u32,
}

/// Outcome as emitted by the model; `dueDate` is kept as text until parsed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LLMOutcome {
    #[serde(default)]
    pub decisions: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<LLMTask>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LLMTask {
    pub description: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl From<LLMOutcome> for MeetingOutcome {
    fn from(outcome: LLMOutcome) -> Self {
        MeetingOutcome {
            decisions: outcome.decisions,
            action_items: outcome.action_items,
            tasks: outcome
                .tasks
                .into_iter()
                .map(|task| OutcomeTask {
                    description: task.description,
                    assignee: task.assignee,
                    due_date: task.due_date.as_deref().and_then(parse_due_date),
                })
                .collect(),
            summary: outcome.summary,
        }
    }
}

/// `YYYY-MM-DD`, optionally followed by a time part; anything else is dropped.
fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let date = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
