//! Shared helpers for the HTTP surface tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{DateTime, Utc};
use reviewbot_api::{router, AppContext};
use reviewbot_core::{DocumentEmbedder, GraphCapability, Summarizer};
use reviewbot_domain::{
    CalendarEvent, Config, MeetingOutcome, OutcomeTask, PlannerTask, Result, ReviewBotError,
    Subscription, TranscriptInfo,
};
use serde_json::json;
use tower::ServiceExt;

pub const MAILBOX: &str = "review@contoso.com";
pub const JOIN_URL: &str = "https://teams.microsoft.com/l/meetup-join/1234:abcXYZ@thread.v2";
pub const MEETING_ID: &str = "1234:abcXYZ@thread.v2";

/// Online meeting with the given invitation response.
pub fn meeting_event(id: &str, response: &str) -> CalendarEvent {
    serde_json::from_value(json!({
        "id": id,
        "subject": "Launch review",
        "start": { "dateTime": "2024-12-18T09:00:00.0000000", "timeZone": "UTC" },
        "end": { "dateTime": "2024-12-18T10:00:00.0000000", "timeZone": "UTC" },
        "isOnlineMeeting": true,
        "onlineMeeting": { "joinUrl": JOIN_URL },
        "organizer": { "emailAddress": { "address": "alice@contoso.com" } },
        "attendees": [{ "emailAddress": { "address": "bob@contoso.com" } }],
        "responseStatus": { "response": response }
    }))
    .expect("event fixture")
}

#[derive(Default)]
struct GraphState {
    events: HashMap<String, CalendarEvent>,
    transcripts: HashMap<String, Vec<(String, String)>>,
    accepted: Vec<String>,
    tasks: Vec<PlannerTask>,
}

/// In-memory graph provider.
#[derive(Clone, Default)]
pub struct StubGraph {
    state: Arc<Mutex<GraphState>>,
}

impl StubGraph {
    pub fn with_event(self, event: CalendarEvent) -> Self {
        self.state.lock().unwrap().events.insert(event.id.clone(), event);
        self
    }

    pub fn with_transcript(self, meeting_id: &str, id: &str, content: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .transcripts
            .entry(meeting_id.to_string())
            .or_default()
            .push((id.to_string(), content.to_string()));
        self
    }

    pub fn accepted(&self) -> Vec<String> {
        self.state.lock().unwrap().accepted.clone()
    }

    pub fn tasks(&self) -> Vec<PlannerTask> {
        self.state.lock().unwrap().tasks.clone()
    }
}

#[async_trait]
impl GraphCapability for StubGraph {
    async fn get_event(&self, _user_id: &str, event_id: &str) -> Result<CalendarEvent> {
        self.state
            .lock()
            .unwrap()
            .events
            .get(event_id)
            .cloned()
            .ok_or_else(|| ReviewBotError::NotFound(format!("event {event_id}")))
    }

    async fn list_transcripts(
        &self,
        _organizer: &str,
        meeting_id: &str,
    ) -> Result<Vec<TranscriptInfo>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .transcripts
            .get(meeting_id)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(id, _)| TranscriptInfo { id: id.clone(), created_date_time: None })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_transcript_content(
        &self,
        _organizer: &str,
        meeting_id: &str,
        transcript_id: &str,
    ) -> Result<String> {
        let state = self.state.lock().unwrap();
        state
            .transcripts
            .get(meeting_id)
            .and_then(|entries| entries.iter().find(|(id, _)| id == transcript_id))
            .map(|(_, content)| content.clone())
            .ok_or_else(|| ReviewBotError::NotFound(format!("transcript {transcript_id}")))
    }

    async fn accept_event(&self, _user_id: &str, event_id: &str, _: &str, _: bool) -> Result<()> {
        self.state.lock().unwrap().accepted.push(event_id.to_string());
        Ok(())
    }

    async fn create_subscription(&self, subscription: &Subscription) -> Result<Subscription> {
        Ok(Subscription { id: Some("sub-1".into()), ..subscription.clone() })
    }

    async fn renew_subscription(&self, id: &str, _: DateTime<Utc>) -> Result<Subscription> {
        Err(ReviewBotError::NotFound(format!("subscription {id}")))
    }

    async fn create_planner_task(&self, task: &PlannerTask) -> Result<()> {
        self.state.lock().unwrap().tasks.push(task.clone());
        Ok(())
    }
}

/// Summarizer returning one decision and one task.
pub struct CannedSummarizer;

#[async_trait]
impl Summarizer for CannedSummarizer {
    async fn summarize(&self, _transcript: &str, subject: &str) -> Result<MeetingOutcome> {
        Ok(MeetingOutcome {
            decisions: vec!["Ship on Friday".into()],
            action_items: vec!["Send release notes".into()],
            tasks: vec![OutcomeTask {
                description: "Prepare launch materials".into(),
                assignee: Some("Alice".into()),
                due_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 3),
            }],
            summary: format!("{subject} wrap-up"),
        })
    }
}

/// Embedder that records the URLs it was asked to write to.
#[derive(Clone, Default)]
pub struct RecordingEmbedder {
    urls: Arc<Mutex<Vec<String>>>,
}

impl RecordingEmbedder {
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentEmbedder for RecordingEmbedder {
    async fn embed_word(&self, url: &str, _: &MeetingOutcome) -> Result<bool> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(true)
    }

    async fn embed_sharepoint(&self, site_url: &str, _: &str, _: &MeetingOutcome) -> Result<bool> {
        self.urls.lock().unwrap().push(site_url.to_string());
        Ok(true)
    }

    async fn embed_loop(&self, url: &str, _: &MeetingOutcome) -> Result<bool> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(true)
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.graph.review_user_id = MAILBOX.to_string();
    config
}

pub fn app(config: Config, graph: StubGraph, embedder: RecordingEmbedder) -> Router {
    let context = AppContext::with_services(
        config,
        Arc::new(graph),
        Arc::new(CannedSummarizer),
        Arc::new(embedder),
    );
    router(Arc::new(context))
}

pub async fn send(app: Router, request: Request<Body>) -> (u16, String) {
    let response: Response<Body> = app.oneshot(request).await.expect("router response");
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}
