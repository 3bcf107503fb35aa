//! Meeting resolver - picks a processing strategy and fetches meeting data.
//!
//! Two strategies exist:
//! - **post-meeting** (`eventId`): read the event, derive the online-meeting id
//!   from its join URL and fetch the first transcript;
//! - **live join** (`meetingUrl` only): always rejected with `NotImplemented`.
//!
//! Failing to read the event is fatal. Failing to list or fetch transcripts is
//! not: the resolver degrades to a successful result carrying basic metadata.

use std::sync::Arc;

use reviewbot_domain::constants::{MSG_LIVE_JOIN_UNSUPPORTED, MSG_MISSING_IDENTIFIER};
use reviewbot_domain::{
    CalendarEvent, MeetingResolution, ResolveRequest, Result, ReviewBotError,
};
use tracing::{debug, error, info, warn};

use super::join_url::{extract_meeting_id, MeetingId};
use crate::graph_ports::GraphCapability;

/// Resolves meetings of the review mailbox.
pub struct MeetingResolver {
    graph: Arc<dyn GraphCapability>,
    mailbox: String,
}

impl MeetingResolver {
    pub fn new(graph: Arc<dyn GraphCapability>, mailbox: impl Into<String>) -> Self {
        Self { graph, mailbox: mailbox.into() }
    }

    /// Resolve a meeting from an event id or a meeting URL.
    ///
    /// # Errors
    /// - `InvalidRequest` when neither identifier is present
    /// - `NotImplemented` when only a meeting URL is present
    /// - the provider error when the event cannot be read
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<MeetingResolution> {
        let event_id = Self::post_meeting_event(request)?;
        self.resolve_post_meeting(event_id).await
    }

    /// Event id of a request the post-meeting strategy can serve.
    ///
    /// Performs no I/O, so callers can reject a request before touching any
    /// provider.
    ///
    /// # Errors
    /// - `InvalidRequest` when neither identifier is present
    /// - `NotImplemented` when only a meeting URL is present
    pub fn post_meeting_event(request: &ResolveRequest) -> Result<&str> {
        match (request.event_id(), request.meeting_url()) {
            (Some(event_id), _) => Ok(event_id),
            (None, Some(meeting_url)) => {
                info!(meeting_url, "live meeting join requested");
                Err(ReviewBotError::NotImplemented(MSG_LIVE_JOIN_UNSUPPORTED.to_string()))
            }
            (None, None) => Err(ReviewBotError::InvalidRequest(MSG_MISSING_IDENTIFIER.to_string())),
        }
    }

    async fn resolve_post_meeting(&self, event_id: &str) -> Result<MeetingResolution> {
        let event = self.graph.get_event(&self.mailbox, event_id).await.map_err(|err| {
            error!(event_id, error = %err, "failed to read event for meeting processing");
            err
        })?;

        info!(event_id, subject = event.subject.as_deref().unwrap_or_default(), "event retrieved");

        let Some(meeting_id) = event.join_url().and_then(extract_meeting_id) else {
            warn!(event_id, join_url = ?event.join_url(), "could not extract online meeting id");
            return Ok(MeetingResolution::not_teams_meeting());
        };
        debug!(
            event_id,
            thread_id = meeting_id.thread_id(),
            domain = meeting_id.domain(),
            "online meeting id extracted"
        );

        match self.first_transcript(&event, &meeting_id).await {
            Ok(Some(transcript)) => {
                info!(event_id, meeting_id = %meeting_id, "transcript retrieved");
                Ok(MeetingResolution::with_transcript(&event, transcript))
            }
            Ok(None) => {
                info!(event_id, meeting_id = %meeting_id, "no transcripts available");
                Ok(MeetingResolution::without_transcript(&event))
            }
            Err(err) => {
                warn!(
                    event_id,
                    meeting_id = %meeting_id,
                    error = %err,
                    "could not fetch transcript"
                );
                Ok(MeetingResolution::without_transcript(&event))
            }
        }
    }

    /// Content of the first transcript as listed by the provider, if any.
    async fn first_transcript(
        &self,
        event: &CalendarEvent,
        meeting_id: &MeetingId,
    ) -> Result<Option<String>> {
        let organizer = event.organizer_address().ok_or_else(|| {
            ReviewBotError::NotFound(format!("event {} has no organizer address", event.id))
        })?;

        let transcripts = self.graph.list_transcripts(organizer, meeting_id.as_str()).await?;
        info!(event_id = %event.id, count = transcripts.len(), "transcripts found");

        let Some(first) = transcripts.first() else {
            return Ok(None);
        };

        let content = self
            .graph
            .get_transcript_content(organizer, meeting_id.as_str(), &first.id)
            .await?;

        Ok(Some(content))
    }
}
