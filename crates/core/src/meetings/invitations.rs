//! Automatic acceptance of meeting invitations for the review mailbox.

use std::sync::Arc;

use reviewbot_domain::constants::ACCEPT_COMMENT;
use tracing::{error, info};

use crate::graph_ports::GraphCapability;

/// Accepts invitations so meetings can be processed without manual action.
///
/// Provider errors are logged and reported as `false`; nothing here
/// propagates an error.
pub struct InvitationAcceptor {
    graph: Arc<dyn GraphCapability>,
    mailbox: String,
}

impl InvitationAcceptor {
    pub fn new(graph: Arc<dyn GraphCapability>, mailbox: impl Into<String>) -> Self {
        Self { graph, mailbox: mailbox.into() }
    }

    /// Accept the invitation without sending a response email.
    pub async fn accept(&self, event_id: &str) -> bool {
        match self.graph.accept_event(&self.mailbox, event_id, ACCEPT_COMMENT, false).await {
            Ok(()) => {
                info!(event_id, "meeting accepted");
                true
            }
            Err(err) => {
                error!(event_id, error = %err, "error accepting meeting");
                false
            }
        }
    }

    /// Whether the mailbox has not yet answered the invitation.
    pub async fn is_pending_invitation(&self, event_id: &str) -> bool {
        match self.graph.get_event(&self.mailbox, event_id).await {
            Ok(event) => event.is_pending_invitation(),
            Err(err) => {
                error!(event_id, error = %err, "error checking event status");
                false
            }
        }
    }

    /// Accept the invitation only while it is still unanswered.
    pub async fn accept_if_pending(&self, event_id: &str) -> bool {
        if !self.is_pending_invitation(event_id).await {
            return false;
        }
        self.accept(event_id).await
    }
}
