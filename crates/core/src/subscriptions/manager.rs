//! Subscription manager - registers and renews the mailbox event subscription.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reviewbot_domain::{Result, ReviewBotError, Subscription};
use tracing::{error, info};

use crate::graph_ports::GraphCapability;

/// Owns the parameters of the review mailbox subscription.
pub struct SubscriptionManager {
    graph: Arc<dyn GraphCapability>,
    mailbox: String,
    notification_url: String,
    client_state: Option<String>,
}

impl SubscriptionManager {
    pub fn new(
        graph: Arc<dyn GraphCapability>,
        mailbox: impl Into<String>,
        notification_url: impl Into<String>,
        client_state: Option<String>,
    ) -> Self {
        Self {
            graph,
            mailbox: mailbox.into(),
            notification_url: notification_url.into(),
            client_state,
        }
    }

    /// Register a subscription on the mailbox's events, expiring one window
    /// after `now`.
    pub async fn create(&self, now: DateTime<Utc>) -> Result<Subscription> {
        let request = Subscription::for_mailbox_events(
            &self.mailbox,
            &self.notification_url,
            self.client_state.clone(),
            now,
        );

        let created = self.graph.create_subscription(&request).await.map_err(|err| {
            error!(resource = %request.resource, error = %err, "error creating subscription");
            err
        })?;

        info!(
            subscription_id = created.id.as_deref().unwrap_or_default(),
            expires = %created.expiration_date_time,
            "subscription created"
        );
        Ok(created)
    }

    /// Extend `subscription` to one window after `now`.
    ///
    /// # Errors
    /// `InvalidRequest` when the subscription was never registered (no id),
    /// otherwise the provider error.
    pub async fn renew(
        &self,
        subscription: &Subscription,
        now: DateTime<Utc>,
    ) -> Result<Subscription> {
        let Some(id) = subscription.id.as_deref() else {
            return Err(ReviewBotError::InvalidRequest(
                "subscription has no id and cannot be renewed".to_string(),
            ));
        };

        let expiration = Subscription::next_expiry(now);
        let renewed = self.graph.renew_subscription(id, expiration).await.map_err(|err| {
            error!(subscription_id = id, error = %err, "error renewing subscription");
            err
        })?;

        info!(
            subscription_id = id,
            expires = %renewed.expiration_date_time,
            "subscription renewed"
        );
        Ok(renewed)
    }
}
