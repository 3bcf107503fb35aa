//! Calendar/meeting provider port interfaces
//!
//! The provider is treated as a capability: read events, list and fetch
//! transcripts, accept invitations, manage the change subscription and create
//! tasks. Implementations live in `reviewbot-infra`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reviewbot_domain::{CalendarEvent, PlannerTask, Result, Subscription, TranscriptInfo};

/// Source of bearer tokens for the graph provider.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Return a currently valid access token.
    async fn access_token(&self) -> Result<String>;
}

/// Trait for calendar/meeting provider operations
#[async_trait]
pub trait GraphCapability: Send + Sync {
    /// Read a calendar event of `user_id` by id
    async fn get_event(&self, user_id: &str, event_id: &str) -> Result<CalendarEvent>;

    /// List transcripts of an online meeting under the organizer's mailbox
    async fn list_transcripts(
        &self,
        organizer: &str,
        meeting_id: &str,
    ) -> Result<Vec<TranscriptInfo>>;

    /// Fetch the textual content of a transcript
    async fn get_transcript_content(
        &self,
        organizer: &str,
        meeting_id: &str,
        transcript_id: &str,
    ) -> Result<String>;

    /// Accept a meeting invitation on behalf of `user_id`
    async fn accept_event(
        &self,
        user_id: &str,
        event_id: &str,
        comment: &str,
        send_response: bool,
    ) -> Result<()>;

    /// Register a change-notification subscription
    async fn create_subscription(&self, subscription: &Subscription) -> Result<Subscription>;

    /// Extend an existing subscription's expiry
    async fn renew_subscription(
        &self,
        subscription_id: &str,
        expiration: DateTime<Utc>,
    ) -> Result<Subscription>;

    /// Create a task in the task-tracking provider
    async fn create_planner_task(&self, task: &PlannerTask) -> Result<()>;
}
