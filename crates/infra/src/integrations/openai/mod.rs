/// OpenAI integration for meeting outcome extraction
///
/// Sends the transcript to the Chat Completions API with a strict JSON schema
/// response format and maps the reply onto a `MeetingOutcome`.
///
/// # Usage
///
/// ```no_run
/// use reviewbot_infra::http::HttpClient;
/// use reviewbot_infra::integrations::openai::OpenAISummarizer;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let http_client = HttpClient::builder().build()?;
/// let api_key = std::env::var("REVIEWBOT_OPENAI_API_KEY")?;
/// let summarizer = OpenAISummarizer::new(api_key, http_client);
///
/// let outcome = summarizer.extract_outcome("Alice: we ship Friday", "Launch sync").await?;
/// println!("{} decisions", outcome.decisions.len());
/// # Ok(())
/// # }
/// ```
///
/// # Error Handling
///
/// - **Network errors / 5xx / 429**: retried by `HttpClient`, then surfaced
/// - **401/403**: `SummarizerError::Authentication`
/// - **Unparseable content**: `SummarizerError::InvalidSchema`
/// - **Unparseable `dueDate`**: the task is kept without a due date
pub mod client;
pub mod types;

pub use client::OpenAISummarizer;
pub use types::SummarizerError;
