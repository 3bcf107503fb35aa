//! Shared test helpers for `reviewbot-core` integration tests.
//!
//! In-memory fakes of the ports plus event fixtures, so tests can focus on
//! behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod graph;
pub mod outcomes;

use reviewbot_domain::{
    CalendarEvent, EmailAddress, EventDateTime, OnlineMeetingInfo, Recipient, ResponseStatus,
};

pub const MAILBOX: &str = "review@contoso.com";
pub const ORGANIZER: &str = "alice@contoso.com";
pub const JOIN_URL: &str = "https://teams.microsoft.com/l/meetup-join/1234:abcXYZ@thread.v2";
pub const MEETING_ID: &str = "1234:abcXYZ@thread.v2";

fn recipient(address: &str) -> Recipient {
    Recipient {
        email_address: Some(EmailAddress { address: Some(address.to_string()), name: None }),
    }
}

fn at(date_time: &str) -> Option<EventDateTime> {
    Some(EventDateTime { date_time: date_time.to_string(), time_zone: Some("UTC".to_string()) })
}

/// Online meeting organised by [`ORGANIZER`] with the given join URL.
pub fn online_event(id: &str, join_url: &str) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        subject: Some("Launch review".to_string()),
        start: at("2024-12-18T09:00:00.0000000"),
        end: at("2024-12-18T10:00:00.0000000"),
        is_online_meeting: true,
        online_meeting: Some(OnlineMeetingInfo { join_url: Some(join_url.to_string()) }),
        organizer: Some(recipient(ORGANIZER)),
        attendees: Some(vec![recipient("bob@contoso.com"), recipient("carol@contoso.com")]),
        response_status: Some(ResponseStatus { response: Some("accepted".to_string()) }),
    }
}

/// Same meeting, but the mailbox has not answered the invitation yet.
pub fn pending_event(id: &str) -> CalendarEvent {
    CalendarEvent {
        response_status: Some(ResponseStatus { response: Some("notResponded".to_string()) }),
        ..online_event(id, JOIN_URL)
    }
}

/// In-person event without conferencing details.
pub fn offline_event(id: &str) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        subject: Some("Lunch".to_string()),
        start: at("2024-12-18T12:00:00.0000000"),
        end: at("2024-12-18T13:00:00.0000000"),
        organizer: Some(recipient(ORGANIZER)),
        ..Default::default()
    }
}
