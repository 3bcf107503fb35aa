//! Change-notification subscription (webhook registration).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{SUBSCRIPTION_CHANGE_TYPE, SUBSCRIPTION_TTL_SECS};

/// Subscription record as exchanged with the provider.
///
/// Expires after a fixed window and must be renewed before expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub change_type: String,
    pub notification_url: String,
    pub resource: String,
    pub expiration_date_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_state: Option<String>,
}

impl Subscription {
    /// Subscription on the events of `user_id`, expiring one window after `now`.
    pub fn for_mailbox_events(
        user_id: &str,
        notification_url: &str,
        client_state: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            change_type: SUBSCRIPTION_CHANGE_TYPE.to_string(),
            notification_url: notification_url.to_string(),
            resource: format!("/users/{user_id}/events"),
            expiration_date_time: Self::next_expiry(now),
            client_state,
        }
    }

    pub fn next_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::seconds(SUBSCRIPTION_TTL_SECS)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date_time <= now
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn mailbox_subscription_expires_after_one_hour() {
        let now = Utc.with_ymd_and_hms(2024, 12, 18, 9, 0, 0).single().expect("valid time");
        let subscription = Subscription::for_mailbox_events(
            "review@contoso.com",
            "https://bot.example/api/listener",
            Some("state".into()),
            now,
        );

        assert_eq!(subscription.change_type, "created,updated");
        assert_eq!(subscription.resource, "/users/review@contoso.com/events");
        assert_eq!(subscription.expiration_date_time, now + Duration::hours(1));
        assert!(!subscription.is_expired(now));
        assert!(subscription.is_expired(now + Duration::hours(1)));

        let json = serde_json::to_value(&subscription).expect("serialize subscription");
        assert_eq!(json["notificationUrl"], "https://bot.example/api/listener");
        assert_eq!(json["clientState"], "state");
        assert!(json.get("id").is_none());
    }
}
