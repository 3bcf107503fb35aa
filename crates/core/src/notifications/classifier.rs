//! Event classifier - decides whether a change notification denotes a
//! meeting worth tracking.

use std::sync::Arc;

use reviewbot_domain::{CalendarEvent, ChangeNotification, TrackedMeeting};
use tracing::{debug, error, info, warn};

use crate::graph_ports::GraphCapability;

/// Classifies calendar change notifications of the review mailbox.
pub struct EventClassifier {
    graph: Arc<dyn GraphCapability>,
    mailbox: String,
}

impl EventClassifier {
    pub fn new(graph: Arc<dyn GraphCapability>, mailbox: impl Into<String>) -> Self {
        Self { graph, mailbox: mailbox.into() }
    }

    /// Classify one notification.
    ///
    /// Only `created` and `updated` notifications are looked up. A failed
    /// lookup is logged and treated as "not tracked"; nothing is retried here.
    pub async fn classify(&self, notification: &ChangeNotification) -> Option<TrackedMeeting> {
        if !notification.change_type.is_trackable() {
            debug!(
                change_type = %notification.change_type,
                resource_id = %notification.resource_id,
                "ignoring notification"
            );
            return None;
        }

        if notification.resource_id.is_empty() {
            warn!(change_type = %notification.change_type, "notification without resource id");
            return None;
        }

        let event = match self.graph.get_event(&self.mailbox, &notification.resource_id).await {
            Ok(event) => event,
            Err(err) => {
                error!(
                    resource_id = %notification.resource_id,
                    error = %err,
                    "error fetching event details"
                );
                return None;
            }
        };

        let tracked = tracked_meeting(&event)?;
        info!(
            event_id = %tracked.event_id,
            subject = %tracked.subject,
            join_url = tracked.join_url.as_deref().unwrap_or_default(),
            organizer = %tracked.organizer_address,
            "Teams meeting detected"
        );
        Some(tracked)
    }
}

/// Build a tracked meeting from an event, or `None` unless the event is an
/// online meeting with a non-empty join URL.
pub fn tracked_meeting(event: &CalendarEvent) -> Option<TrackedMeeting> {
    if !event.is_online_meeting {
        return None;
    }
    let join_url = event.join_url()?;

    Some(TrackedMeeting {
        event_id: event.id.clone(),
        subject: event.subject.clone().unwrap_or_default(),
        start: event.start.clone(),
        end: event.end.clone(),
        is_online_meeting: true,
        join_url: Some(join_url.to_string()),
        organizer_address: event.organizer_address().unwrap_or_default().to_string(),
    })
}
