/// OpenAI API client for meeting outcome extraction
use async_trait::async_trait;
use reqwest::Method;
use reviewbot_core::Summarizer;
use reviewbot_domain::{MeetingOutcome, Result as DomainResult, ReviewBotError, SummarizerConfig};
use serde_json::json;
use tracing::{debug, info};

use crate::http::HttpClient;

use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, JsonSchema, LLMOutcome,
    ResponseFormat, SummarizerError,
};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 4_000;
const DEFAULT_TEMPERATURE: f32 = 0.2;
/// Transcripts longer than this are cut before prompting.
const MAX_TRANSCRIPT_CHARS: usize = 100_000;
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

const SYSTEM_PROMPT: &str = "You review meeting transcripts. Extract the decisions that were \
made, the action items that were agreed, concrete tasks with their owner and due date when \
stated, and a short summary. Use only information present in the transcript.";

/// OpenAI API client that turns transcripts into meeting outcomes
pub struct OpenAISummarizer {
    http_client: HttpClient,
    api_key: String,
    model: String,
    api_url: String,
}

impl OpenAISummarizer {
    /// Create a new summarizer
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key (required)
    /// * `http_client` - HTTP client with retry logic
    pub fn new(api_key: String, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            api_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Build from configuration; `None` when no API key is configured.
    pub fn from_config(config: &SummarizerConfig, http_client: HttpClient) -> Option<Self> {
        let api_key = config.api_key.as_deref().filter(|key| !key.is_empty())?;
        Some(
            Self::new(api_key.to_string(), http_client)
                .with_model(config.model.clone())
                .with_api_url(config.api_url.clone()),
        )
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a custom API URL (Azure OpenAI deployments, tests)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Extract the outcome of a meeting from its transcript
    ///
    /// # Errors
    /// Returns `SummarizerError` for network failures, API errors, or invalid responses
    pub async fn extract_outcome(
        &self,
        transcript: &str,
        subject: &str,
    ) -> Result<MeetingOutcome, SummarizerError> {
        info!(subject, model = %self.model, "Summarizing transcript with OpenAI");

        let request_payload = self.build_request(transcript, subject);

        let request_builder = self
            .http_client
            .request(Method::POST, &self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_payload);

        // Completions have no side effect, so the transport may resend them
        let response = self
            .http_client
            .send_replayable(request_builder)
            .await
            .map_err(|err| SummarizerError::Network(err.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Received OpenAI API response");

        if !status.is_success() {
            return Err(handle_error_status(status.as_u16(), response).await);
        }

        let chat_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| {
                SummarizerError::InvalidSchema(format!("Failed to parse response: {}", e))
            })?;

        let content = chat_response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or_else(|| {
                SummarizerError::InvalidSchema("Response contained no content".to_string())
            })?;

        let outcome: LLMOutcome = serde_json::from_str(content).map_err(|e| {
            SummarizerError::InvalidSchema(format!(
                "Failed to parse outcome: {}. Content: {}",
                e, content
            ))
        })?;

        info!(
            subject,
            tokens = chat_response.usage.map(|usage| usage.total_tokens).unwrap_or_default(),
            "OpenAI summarization complete"
        );

        Ok(outcome.into())
    }

    fn build_request(&self, transcript: &str, subject: &str) -> ChatCompletionRequest {
        let prompt = format!(
            "Meeting subject: {subject}\n\nTranscript:\n{}\n\nReturn JSON with decisions, \
             actionItems, tasks (description, assignee, dueDate as YYYY-MM-DD) and summary.",
            truncate(transcript, MAX_TRANSCRIPT_CHARS)
        );

        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage { role: "system".to_string(), content: SYSTEM_PROMPT.to_string() },
                ChatMessage { role: "user".to_string(), content: prompt },
            ],
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            response_format: ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: Some(JsonSchema {
                    name: "meeting_outcome".to_string(),
                    schema: json!({
                        "type": "object",
                        "properties": {
                            "decisions": { "type": "array", "items": { "type": "string" } },
                            "actionItems": { "type": "array", "items": { "type": "string" } },
                            "tasks": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "description": { "type": "string" },
                                        "assignee": { "type": ["string", "null"] },
                                        "dueDate": { "type": ["string", "null"] }
                                    },
                                    "required": ["description", "assignee", "dueDate"],
                                    "additionalProperties": false
                                }
                            },
                            "summary": { "type": "string" }
                        },
                        "required": ["decisions", "actionItems", "tasks", "summary"],
                        "additionalProperties": false
                    }),
                    strict: Some(true),
                }),
            },
        }
    }
}

/// Handle HTTP error status codes
async fn handle_error_status(status: u16, response: reqwest::Response) -> SummarizerError {
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());
    let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

    match status {
        401 | 403 => SummarizerError::Authentication(format!("Invalid API key ({})", status)),
        429 => SummarizerError::RateLimit(retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS)),
        _ => SummarizerError::Api { status, message },
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[async_trait]
impl Summarizer for OpenAISummarizer {
    async fn summarize(&self, transcript: &str, subject: &str) -> DomainResult<MeetingOutcome> {
        self.extract_outcome(transcript, subject).await.map_err(ReviewBotError::from)
    }
}
