//! Webhook gateway - the externally facing side of the notification pipeline.
//!
//! Protocol:
//! 1. A non-empty `validationToken` query parameter is echoed back verbatim as
//!    `text/plain` with status 200 (subscription handshake).
//! 2. A body that is not JSON yields 500. This is the only 500 path.
//! 3. Any JSON body is acknowledged with 202. Items of its `value` array are
//!    classified one at a time, in order; a failing item never affects its
//!    siblings or the status code.

use reviewbot_domain::constants::{MSG_NOTIFICATION_ERROR, MSG_NOTIFICATION_PROCESSED};
use reviewbot_domain::{ChangeNotification, TrackedMeeting};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::classifier::EventClassifier;
use crate::meetings::InvitationAcceptor;

const TEXT_PLAIN: &str = "text/plain";

/// Transport-neutral view of an inbound webhook call.
#[derive(Debug, Clone, Copy)]
pub struct WebhookRequest<'a> {
    pub validation_token: Option<&'a str>,
    pub body: &'a [u8],
}

/// Response the transport should send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    /// What happened to the batch; `None` for handshakes and parse failures.
    pub report: Option<BatchReport>,
}

impl WebhookResponse {
    fn validation(token: &str) -> Self {
        Self { status: 200, content_type: TEXT_PLAIN, body: token.to_string(), report: None }
    }

    fn accepted(report: BatchReport) -> Self {
        Self {
            status: 202,
            content_type: TEXT_PLAIN,
            body: MSG_NOTIFICATION_PROCESSED.to_string(),
            report: Some(report),
        }
    }

    fn malformed() -> Self {
        Self {
            status: 500,
            content_type: TEXT_PLAIN,
            body: MSG_NOTIFICATION_ERROR.to_string(),
            report: None,
        }
    }
}

/// Per-batch processing summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Elements found in the `value` array.
    pub received: usize,
    /// Meetings the classifier decided to track, in batch order.
    pub tracked: Vec<TrackedMeeting>,
    /// Elements that were malformed or failed the client-state check.
    pub rejected: usize,
    pub accepted_invitations: usize,
}

/// Validates handshakes and dispatches notification batches.
pub struct WebhookGateway {
    classifier: EventClassifier,
    acceptor: Option<InvitationAcceptor>,
    client_state: Option<String>,
}

impl WebhookGateway {
    pub fn new(classifier: EventClassifier) -> Self {
        Self { classifier, acceptor: None, client_state: None }
    }

    /// Only accept notifications whose `clientState` matches (when they carry one).
    pub fn with_client_state(mut self, client_state: Option<String>) -> Self {
        self.client_state = client_state.filter(|state| !state.is_empty());
        self
    }

    /// Accept unanswered invitations of tracked meetings.
    pub fn with_invitation_acceptor(mut self, acceptor: InvitationAcceptor) -> Self {
        self.acceptor = Some(acceptor);
        self
    }

    /// Handle one inbound webhook call.
    pub async fn handle(&self, request: WebhookRequest<'_>) -> WebhookResponse {
        if let Some(token) = request.validation_token.filter(|token| !token.is_empty()) {
            info!("returning validation token");
            return WebhookResponse::validation(token);
        }

        let payload: Value = match serde_json::from_slice(request.body) {
            Ok(payload) => payload,
            Err(err) => {
                error!(error = %err, "error processing notification: body is not JSON");
                return WebhookResponse::malformed();
            }
        };

        debug!(payload = %payload, "received notification payload");

        let report = self.process_payload(&payload).await;
        info!(
            received = report.received,
            tracked = report.tracked.len(),
            rejected = report.rejected,
            accepted_invitations = report.accepted_invitations,
            "notification batch processed"
        );

        WebhookResponse::accepted(report)
    }

    /// Process the `value` array of a parsed payload, sequentially.
    ///
    /// A missing or non-array `value` is an empty batch.
    pub async fn process_payload(&self, payload: &Value) -> BatchReport {
        let mut report = BatchReport::default();

        let Some(items) = payload.get("value").and_then(Value::as_array) else {
            warn!("notification payload has no value array");
            return report;
        };

        report.received = items.len();
        for (index, item) in items.iter().enumerate() {
            self.process_item(index, item, &mut report).await;
        }

        report
    }

    async fn process_item(&self, index: usize, item: &Value, report: &mut BatchReport) {
        let notification = match ChangeNotification::from_raw(item.clone()) {
            Ok(notification) => notification,
            Err(err) => {
                warn!(index, error = %err, "skipping malformed notification");
                report.rejected += 1;
                return;
            }
        };

        info!(
            index,
            change_type = %notification.change_type,
            resource_id = %notification.resource_id,
            "processing notification"
        );

        if !self.client_state_matches(&notification) {
            warn!(
                index,
                resource_id = %notification.resource_id,
                "skipping notification with unexpected client state"
            );
            report.rejected += 1;
            return;
        }

        let Some(tracked) = self.classifier.classify(&notification).await else {
            return;
        };

        if let Some(acceptor) = &self.acceptor {
            if acceptor.accept_if_pending(&tracked.event_id).await {
                report.accepted_invitations += 1;
            }
        }

        report.tracked.push(tracked);
    }

    fn client_state_matches(&self, notification: &ChangeNotification) -> bool {
        match (&self.client_state, &notification.client_state) {
            (Some(expected), Some(received)) => expected == received,
            _ => true,
        }
    }
}
