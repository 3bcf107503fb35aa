//! Outcome extraction wrapper around a [`Summarizer`].

use std::sync::Arc;

use async_trait::async_trait;
use reviewbot_domain::{MeetingOutcome, OutcomeTask, Result};
use tracing::{debug, info};

use super::ports::Summarizer;

/// Normalizes summarizer output so downstream publishers can rely on it.
///
/// Blank decisions, action items and task descriptions are dropped and an
/// empty summary becomes `"Meeting: <subject>"`.
pub struct OutcomeExtractor {
    summarizer: Arc<dyn Summarizer>,
}

impl OutcomeExtractor {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self { summarizer }
    }

    /// Extract the outcome of a meeting.
    ///
    /// # Errors
    /// Returns the summarizer's error unchanged.
    pub async fn extract(&self, transcript: &str, subject: &str) -> Result<MeetingOutcome> {
        debug!(subject, transcript_len = transcript.len(), "extracting meeting outcome");

        let raw = self.summarizer.summarize(transcript, subject).await?;
        let outcome = normalize(raw, subject);

        info!(
            subject,
            decisions = outcome.decisions.len(),
            action_items = outcome.action_items.len(),
            tasks = outcome.tasks.len(),
            "meeting outcome extracted"
        );
        Ok(outcome)
    }
}

fn normalize(outcome: MeetingOutcome, subject: &str) -> MeetingOutcome {
    let summary = match outcome.summary.trim() {
        "" => fallback_summary(subject),
        summary => summary.to_string(),
    };

    MeetingOutcome {
        decisions: non_blank(outcome.decisions),
        action_items: non_blank(outcome.action_items),
        tasks: outcome
            .tasks
            .into_iter()
            .filter_map(|task| {
                let description = task.description.trim();
                (!description.is_empty()).then(|| OutcomeTask {
                    description: description.to_string(),
                    assignee: task
                        .assignee
                        .map(|assignee| assignee.trim().to_string())
                        .filter(|assignee| !assignee.is_empty()),
                    due_date: task.due_date,
                })
            })
            .collect(),
        summary,
    }
}

fn non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn fallback_summary(subject: &str) -> String {
    format!("Meeting: {subject}")
}

/// Summarizer used when no language model is configured.
///
/// Produces an outcome with no decisions, action items or tasks and the
/// subject-derived summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectOnlySummarizer;

#[async_trait]
impl Summarizer for SubjectOnlySummarizer {
    async fn summarize(&self, _transcript: &str, subject: &str) -> Result<MeetingOutcome> {
        Ok(MeetingOutcome { summary: fallback_summary(subject), ..Default::default() })
    }
}
