mod support;

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use reviewbot_core::SubscriptionManager;
use reviewbot_domain::{ReviewBotError, Subscription};
use support::graph::{FakeGraph, GraphCall};
use support::MAILBOX;

const NOTIFICATION_URL: &str = "https://bot.example/api/listener";

fn manager(graph: &FakeGraph) -> SubscriptionManager {
    SubscriptionManager::new(
        Arc::new(graph.clone()),
        MAILBOX,
        NOTIFICATION_URL,
        Some("secret".to_string()),
    )
}

#[tokio::test]
async fn create_registers_mailbox_events_for_one_hour() {
    let graph = FakeGraph::new();
    let now = Utc.with_ymd_and_hms(2024, 12, 18, 9, 0, 0).unwrap();

    let created = manager(&graph).create(now).await.unwrap();

    assert_eq!(created.id.as_deref(), Some("sub-1"));
    let GraphCall::CreateSubscription(request) = &graph.calls()[0] else {
        panic!("expected a subscription request");
    };
    assert_eq!(request.change_type, "created,updated");
    assert_eq!(request.notification_url, NOTIFICATION_URL);
    assert_eq!(request.resource, "/users/review@contoso.com/events");
    assert_eq!(request.expiration_date_time, now + Duration::hours(1));
    assert_eq!(request.client_state.as_deref(), Some("secret"));
}

#[tokio::test]
async fn renew_extends_expiry_from_now() {
    let graph = FakeGraph::new();
    let created_at = Utc.with_ymd_and_hms(2024, 12, 18, 9, 0, 0).unwrap();
    let manager = manager(&graph);
    let subscription = manager.create(created_at).await.unwrap();

    let now = created_at + Duration::minutes(30);
    let renewed = manager.renew(&subscription, now).await.unwrap();

    assert_eq!(renewed.expiration_date_time, now + Duration::hours(1));
    assert!(graph.calls().contains(&GraphCall::RenewSubscription {
        subscription_id: "sub-1".to_string(),
        expiration: now + Duration::hours(1),
    }));
}

#[tokio::test]
async fn renew_requires_a_registered_subscription() {
    let graph = FakeGraph::new();
    let now = Utc.with_ymd_and_hms(2024, 12, 18, 9, 0, 0).unwrap();
    let unregistered =
        Subscription::for_mailbox_events(MAILBOX, NOTIFICATION_URL, None, now);

    let err = manager(&graph).renew(&unregistered, now).await.unwrap_err();

    assert!(matches!(err, ReviewBotError::InvalidRequest(_)));
    assert!(graph.calls().is_empty());
}

#[tokio::test]
async fn provider_failures_propagate() {
    let graph = FakeGraph::new().failing_subscriptions();
    let now = Utc.with_ymd_and_hms(2024, 12, 18, 9, 0, 0).unwrap();

    assert!(manager(&graph).create(now).await.is_err());
}
