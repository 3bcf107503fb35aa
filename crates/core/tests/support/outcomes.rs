//! Fakes for the summarizer and document embedder ports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use reviewbot_core::{DocumentEmbedder, Summarizer};
use reviewbot_domain::{MeetingOutcome, OutcomeTask, Result as DomainResult, ReviewBotError};

/// Outcome with two tasks, one of them dated.
pub fn sample_outcome() -> MeetingOutcome {
    MeetingOutcome {
        decisions: vec!["Ship on Friday".to_string()],
        action_items: vec!["Update the runbook".to_string()],
        tasks: vec![
            OutcomeTask {
                description: "Write release notes".to_string(),
                assignee: Some("Bob".to_string()),
                due_date: NaiveDate::from_ymd_opt(2025, 1, 3),
            },
            OutcomeTask {
                description: "Book the demo room".to_string(),
                assignee: None,
                due_date: None,
            },
        ],
        summary: "Release planning for the January launch".to_string(),
    }
}

/// Summarizer returning a fixed outcome (or failing) and recording its inputs.
#[derive(Clone)]
pub struct FakeSummarizer {
    outcome: Option<MeetingOutcome>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeSummarizer {
    pub fn returning(outcome: MeetingOutcome) -> Self {
        Self { outcome: Some(outcome), calls: Arc::default() }
    }

    pub fn failing() -> Self {
        Self { outcome: None, calls: Arc::default() }
    }

    /// (transcript, subject) pairs received so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(&self, transcript: &str, subject: &str) -> DomainResult<MeetingOutcome> {
        self.calls.lock().unwrap().push((transcript.to_string(), subject.to_string()));
        self.outcome
            .clone()
            .ok_or_else(|| ReviewBotError::Provider("summarizer unavailable".to_string()))
    }
}

/// Embed call received by [`FakeEmbedder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedCall {
    Word { url: String },
    SharePoint { site_url: String, file_path: String },
    Loop { url: String },
}

#[derive(Clone, Default)]
pub struct FakeEmbedder {
    calls: Arc<Mutex<Vec<EmbedCall>>>,
    fail: bool,
}

impl FakeEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn calls(&self) -> Vec<EmbedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: EmbedCall) -> DomainResult<bool> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(ReviewBotError::Provider("document locked".to_string()));
        }
        Ok(true)
    }
}

#[async_trait]
impl DocumentEmbedder for FakeEmbedder {
    async fn embed_word(&self, url: &str, _outcome: &MeetingOutcome) -> DomainResult<bool> {
        self.record(EmbedCall::Word { url: url.to_string() })
    }

    async fn embed_sharepoint(
        &self,
        site_url: &str,
        file_path: &str,
        _outcome: &MeetingOutcome,
    ) -> DomainResult<bool> {
        self.record(EmbedCall::SharePoint {
            site_url: site_url.to_string(),
            file_path: file_path.to_string(),
        })
    }

    async fn embed_loop(&self, url: &str, _outcome: &MeetingOutcome) -> DomainResult<bool> {
        self.record(EmbedCall::Loop { url: url.to_string() })
    }
}
