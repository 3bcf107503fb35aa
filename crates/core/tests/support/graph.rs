//! In-memory `GraphCapability` fake.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reviewbot_core::GraphCapability;
use reviewbot_domain::{
    CalendarEvent, PlannerTask, Result as DomainResult, ReviewBotError, Subscription,
    TranscriptInfo,
};

/// Calls received by [`FakeGraph`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphCall {
    GetEvent { user_id: String, event_id: String },
    ListTranscripts { organizer: String, meeting_id: String },
    GetTranscriptContent { organizer: String, meeting_id: String, transcript_id: String },
    AcceptEvent { user_id: String, event_id: String, comment: String, send_response: bool },
    CreateSubscription(Subscription),
    RenewSubscription { subscription_id: String, expiration: DateTime<Utc> },
    CreatePlannerTask(PlannerTask),
}

#[derive(Default)]
struct GraphState {
    events: HashMap<String, CalendarEvent>,
    transcripts: HashMap<String, Vec<TranscriptInfo>>,
    contents: HashMap<String, String>,
    fail_events: bool,
    fail_transcripts: bool,
    fail_accept: bool,
    fail_subscriptions: bool,
    failing_tasks: HashSet<String>,
    calls: Vec<GraphCall>,
}

/// Configurable fake provider recording every call.
#[derive(Default, Clone)]
pub struct FakeGraph {
    state: Arc<Mutex<GraphState>>,
}

impl FakeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(self, event: CalendarEvent) -> Self {
        self.state.lock().unwrap().events.insert(event.id.clone(), event);
        self
    }

    /// Register transcripts (id, content) for a meeting id.
    pub fn with_transcripts(self, meeting_id: &str, transcripts: &[(&str, &str)]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let infos = transcripts
                .iter()
                .map(|(id, _)| TranscriptInfo { id: (*id).to_string(), created_date_time: None })
                .collect();
            state.transcripts.insert(meeting_id.to_string(), infos);
            for (id, content) in transcripts {
                state.contents.insert((*id).to_string(), (*content).to_string());
            }
        }
        self
    }

    pub fn failing_events(self) -> Self {
        self.state.lock().unwrap().fail_events = true;
        self
    }

    pub fn failing_transcripts(self) -> Self {
        self.state.lock().unwrap().fail_transcripts = true;
        self
    }

    pub fn failing_accept(self) -> Self {
        self.state.lock().unwrap().fail_accept = true;
        self
    }

    pub fn failing_subscriptions(self) -> Self {
        self.state.lock().unwrap().fail_subscriptions = true;
        self
    }

    pub fn failing_task(self, title: &str) -> Self {
        self.state.lock().unwrap().failing_tasks.insert(title.to_string());
        self
    }

    pub fn calls(&self) -> Vec<GraphCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn accepted_events(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GraphCall::AcceptEvent { event_id, .. } => Some(event_id),
                _ => None,
            })
            .collect()
    }

    pub fn created_tasks(&self) -> Vec<PlannerTask> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GraphCall::CreatePlannerTask(task) => Some(task),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GraphCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

fn provider_error(what: &str) -> ReviewBotError {
    ReviewBotError::Provider(format!("{what} failed: 503 Service Unavailable"))
}

#[async_trait]
impl GraphCapability for FakeGraph {
    async fn get_event(&self, user_id: &str, event_id: &str) -> DomainResult<CalendarEvent> {
        self.record(GraphCall::GetEvent {
            user_id: user_id.to_string(),
            event_id: event_id.to_string(),
        });

        let state = self.state.lock().unwrap();
        if state.fail_events {
            return Err(provider_error("event lookup"));
        }
        state
            .events
            .get(event_id)
            .cloned()
            .ok_or_else(|| ReviewBotError::NotFound(format!("event {event_id} not found")))
    }

    async fn list_transcripts(
        &self,
        organizer: &str,
        meeting_id: &str,
    ) -> DomainResult<Vec<TranscriptInfo>> {
        self.record(GraphCall::ListTranscripts {
            organizer: organizer.to_string(),
            meeting_id: meeting_id.to_string(),
        });

        let state = self.state.lock().unwrap();
        if state.fail_transcripts {
            return Err(provider_error("transcript listing"));
        }
        Ok(state.transcripts.get(meeting_id).cloned().unwrap_or_default())
    }

    async fn get_transcript_content(
        &self,
        organizer: &str,
        meeting_id: &str,
        transcript_id: &str,
    ) -> DomainResult<String> {
        self.record(GraphCall::GetTranscriptContent {
            organizer: organizer.to_string(),
            meeting_id: meeting_id.to_string(),
            transcript_id: transcript_id.to_string(),
        });

        self.state
            .lock()
            .unwrap()
            .contents
            .get(transcript_id)
            .cloned()
            .ok_or_else(|| ReviewBotError::NotFound(format!("transcript {transcript_id}")))
    }

    async fn accept_event(
        &self,
        user_id: &str,
        event_id: &str,
        comment: &str,
        send_response: bool,
    ) -> DomainResult<()> {
        self.record(GraphCall::AcceptEvent {
            user_id: user_id.to_string(),
            event_id: event_id.to_string(),
            comment: comment.to_string(),
            send_response,
        });

        if self.state.lock().unwrap().fail_accept {
            return Err(provider_error("accept"));
        }
        Ok(())
    }

    async fn create_subscription(&self, subscription: &Subscription) -> DomainResult<Subscription> {
        self.record(GraphCall::CreateSubscription(subscription.clone()));

        if self.state.lock().unwrap().fail_subscriptions {
            return Err(provider_error("subscription"));
        }
        Ok(Subscription { id: Some("sub-1".to_string()), ..subscription.clone() })
    }

    async fn renew_subscription(
        &self,
        subscription_id: &str,
        expiration: DateTime<Utc>,
    ) -> DomainResult<Subscription> {
        self.record(GraphCall::RenewSubscription {
            subscription_id: subscription_id.to_string(),
            expiration,
        });

        if self.state.lock().unwrap().fail_subscriptions {
            return Err(provider_error("subscription renewal"));
        }
        Ok(Subscription {
            id: Some(subscription_id.to_string()),
            change_type: "created,updated".to_string(),
            notification_url: "https://bot.example/api/listener".to_string(),
            resource: "/users/review@contoso.com/events".to_string(),
            expiration_date_time: expiration,
            client_state: None,
        })
    }

    async fn create_planner_task(&self, task: &PlannerTask) -> DomainResult<()> {
        self.record(GraphCall::CreatePlannerTask(task.clone()));

        if self.state.lock().unwrap().failing_tasks.contains(&task.title) {
            return Err(provider_error("task creation"));
        }
        Ok(())
    }
}
