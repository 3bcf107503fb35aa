//! Structured meeting outcomes and the remote tasks derived from them.

use chrono::{NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};

/// Structured outcome extracted from a meeting transcript.
///
/// Every sequence may be empty but is never absent, and `summary` is always
/// present; deserialization fills missing fields with empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingOutcome {
    #[serde(default)]
    pub decisions: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<OutcomeTask>,
    #[serde(default)]
    pub summary: String,
}

impl MeetingOutcome {
    /// Plain-text rendering: summary, then one bulleted section per
    /// non-empty list.
    pub fn to_plain_text(&self) -> String {
        let mut text = String::new();
        text.push_str(self.summary.trim());
        text.push('\n');

        push_section(&mut text, "Decisions", self.decisions.iter().map(String::as_str));
        push_section(&mut text, "Action items", self.action_items.iter().map(String::as_str));

        if !self.tasks.is_empty() {
            text.push_str("\nTasks:\n");
            for task in &self.tasks {
                text.push_str("- ");
                text.push_str(&task.description);
                if let Some(assignee) = &task.assignee {
                    text.push_str(&format!(" ({assignee})"));
                }
                if let Some(due) = task.due_date {
                    text.push_str(&format!(" due {due}"));
                }
                text.push('\n');
            }
        }

        text
    }
}

fn push_section<'a>(
    text: &mut String,
    title: &str,
    items: impl ExactSizeIterator<Item = &'a str>,
) {
    if items.len() == 0 {
        return;
    }
    text.push_str(&format!("\n{title}:\n"));
    for item in items {
        text.push_str("- ");
        text.push_str(item);
        text.push('\n');
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeTask {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Task creation payload for the task-tracking provider (Planner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerTask {
    pub plan_id: String,
    pub bucket_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date_time: Option<String>,
}

impl PlannerTask {
    /// Build a task due at midnight UTC of the outcome task's due date.
    pub fn from_outcome_task(plan_id: &str, bucket_id: &str, task: &OutcomeTask) -> Self {
        let due_date_time = task
            .due_date
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true));

        Self {
            plan_id: plan_id.to_string(),
            bucket_id: bucket_id.to_string(),
            title: task.description.clone(),
            due_date_time,
        }
    }
}
