//! Port interfaces for outcome extraction

use async_trait::async_trait;
use reviewbot_domain::{MeetingOutcome, Result};

/// Turns a transcript into a structured outcome.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `transcript` of the meeting titled `subject`.
    async fn summarize(&self, transcript: &str, subject: &str) -> Result<MeetingOutcome>;
}
