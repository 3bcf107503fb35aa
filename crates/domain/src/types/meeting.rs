//! Calendar event, tracked meeting and meeting resolution types.

use serde::{Deserialize, Serialize};

use crate::constants::{
    MSG_NOT_TEAMS_MEETING, MSG_TRANSCRIPT_RETRIEVED, MSG_TRANSCRIPT_UNAVAILABLE,
};

/// Date/time pair as returned by the calendar provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Organizer or attendee entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    #[serde(default)]
    pub email_address: Option<EmailAddress>,
}

impl Recipient {
    pub fn address(&self) -> Option<&str> {
        self.email_address
            .as_ref()
            .and_then(|email| email.address.as_deref())
            .map(str::trim)
            .filter(|address| !address.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineMeetingInfo {
    #[serde(default)]
    pub join_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStatus {
    #[serde(default)]
    pub response: Option<String>,
}

/// Calendar event read model (subset of the provider's event resource).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub start: Option<EventDateTime>,
    #[serde(default)]
    pub end: Option<EventDateTime>,
    #[serde(default)]
    pub is_online_meeting: bool,
    #[serde(default)]
    pub online_meeting: Option<OnlineMeetingInfo>,
    #[serde(default)]
    pub organizer: Option<Recipient>,
    #[serde(default)]
    pub attendees: Option<Vec<Recipient>>,
    #[serde(default)]
    pub response_status: Option<ResponseStatus>,
}

impl CalendarEvent {
    /// Non-empty join URL of the online meeting, if any.
    pub fn join_url(&self) -> Option<&str> {
        self.online_meeting
            .as_ref()
            .and_then(|meeting| meeting.join_url.as_deref())
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn organizer_address(&self) -> Option<&str> {
        self.organizer.as_ref().and_then(Recipient::address)
    }

    pub fn attendee_addresses(&self) -> Vec<String> {
        self.attendees
            .iter()
            .flatten()
            .filter_map(Recipient::address)
            .map(str::to_string)
            .collect()
    }

    /// True while the mailbox has not answered the invitation.
    pub fn is_pending_invitation(&self) -> bool {
        matches!(
            self.response_status.as_ref().and_then(|status| status.response.as_deref()),
            Some("notResponded") | Some("none")
        )
    }
}

/// Minimal record kept for an online meeting worth following up on.
///
/// Identity is `event_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedMeeting {
    pub event_id: String,
    pub subject: String,
    pub start: Option<EventDateTime>,
    pub end: Option<EventDateTime>,
    pub is_online_meeting: bool,
    pub join_url: Option<String>,
    pub organizer_address: String,
}

/// Transcript listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptInfo {
    pub id: String,
    #[serde(default)]
    pub created_date_time: Option<String>,
}

/// Body of a meeting-processing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    #[serde(default)]
    pub meeting_url: Option<String>,
    #[serde(default)]
    pub event_id: Option<String>,
}

impl ResolveRequest {
    pub fn for_event(event_id: impl Into<String>) -> Self {
        Self { meeting_url: None, event_id: Some(event_id.into()) }
    }

    pub fn for_meeting_url(meeting_url: impl Into<String>) -> Self {
        Self { meeting_url: Some(meeting_url.into()), event_id: None }
    }

    /// Event id with surrounding whitespace removed; blank counts as absent.
    pub fn event_id(&self) -> Option<&str> {
        non_blank(self.event_id.as_deref())
    }

    pub fn meeting_url(&self) -> Option<&str> {
        non_blank(self.meeting_url.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Result of resolving a meeting.
///
/// `success = false` is a negative but successful resolution (the event is not
/// a Teams meeting); transport or provider failures are reported as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingResolution {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<String>>,
    pub message: String,
}

impl MeetingResolution {
    pub fn not_teams_meeting() -> Self {
        Self {
            success: false,
            event_id: None,
            subject: None,
            transcript: None,
            start: None,
            end: None,
            attendees: None,
            message: MSG_NOT_TEAMS_MEETING.to_string(),
        }
    }

    pub fn with_transcript(event: &CalendarEvent, transcript: String) -> Self {
        Self {
            success: true,
            event_id: Some(event.id.clone()),
            subject: event.subject.clone(),
            transcript: Some(transcript),
            start: None,
            end: None,
            attendees: None,
            message: MSG_TRANSCRIPT_RETRIEVED.to_string(),
        }
    }

    /// Degraded success: basic metadata without a transcript.
    pub fn without_transcript(event: &CalendarEvent) -> Self {
        Self {
            success: true,
            event_id: Some(event.id.clone()),
            subject: event.subject.clone(),
            transcript: None,
            start: event.start.clone(),
            end: event.end.clone(),
            attendees: Some(event.attendee_addresses()),
            message: MSG_TRANSCRIPT_UNAVAILABLE.to_string(),
        }
    }

    pub fn has_transcript(&self) -> bool {
        self.transcript.as_deref().is_some_and(|text| !text.trim().is_empty())
    }
}
