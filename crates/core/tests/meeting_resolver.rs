mod support;

use std::sync::Arc;

use reviewbot_core::{extract_meeting_id, MeetingResolver};
use reviewbot_domain::constants::{MSG_LIVE_JOIN_UNSUPPORTED, MSG_TRANSCRIPT_UNAVAILABLE};
use reviewbot_domain::{ResolveRequest, ReviewBotError};
use serde_json::json;
use support::graph::{FakeGraph, GraphCall};
use support::{online_event, JOIN_URL, MAILBOX, MEETING_ID, ORGANIZER};

fn resolver(graph: &FakeGraph) -> MeetingResolver {
    MeetingResolver::new(Arc::new(graph.clone()), MAILBOX)
}

#[tokio::test]
async fn first_transcript_is_returned() {
    let graph = FakeGraph::new()
        .with_event(online_event("E1", JOIN_URL))
        .with_transcripts(MEETING_ID, &[("T1", "WEBVTT\n\nAlice: hello"), ("T2", "second")]);

    let resolution = resolver(&graph).resolve(&ResolveRequest::for_event("E1")).await.unwrap();

    assert!(resolution.success);
    assert_eq!(resolution.event_id.as_deref(), Some("E1"));
    assert_eq!(resolution.subject.as_deref(), Some("Launch review"));
    assert_eq!(resolution.transcript.as_deref(), Some("WEBVTT\n\nAlice: hello"));
    assert_eq!(resolution.message, "Transcript retrieved successfully");
    assert!(graph.calls().contains(&GraphCall::GetTranscriptContent {
        organizer: ORGANIZER.to_string(),
        meeting_id: MEETING_ID.to_string(),
        transcript_id: "T1".to_string(),
    }));
}

#[tokio::test]
async fn zero_transcripts_degrade_to_metadata() {
    let graph = FakeGraph::new().with_event(online_event("E1", JOIN_URL));

    let resolution = resolver(&graph).resolve(&ResolveRequest::for_event("E1")).await.unwrap();

    let body = serde_json::to_value(&resolution).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["eventId"], "E1");
    assert_eq!(body["message"], MSG_TRANSCRIPT_UNAVAILABLE);
    assert_eq!(body["attendees"], json!(["bob@contoso.com", "carol@contoso.com"]));
    assert!(body.get("transcript").is_none());
    assert!(graph.calls().contains(&GraphCall::ListTranscripts {
        organizer: ORGANIZER.to_string(),
        meeting_id: MEETING_ID.to_string(),
    }));
}

#[tokio::test]
async fn transcript_failure_never_propagates() {
    let graph = FakeGraph::new().with_event(online_event("E1", JOIN_URL)).failing_transcripts();

    let resolution = resolver(&graph).resolve(&ResolveRequest::for_event("E1")).await.unwrap();

    assert!(resolution.success);
    assert!(resolution.message.contains("transcript not available"));
    assert_eq!(resolution.subject.as_deref(), Some("Launch review"));
    assert!(resolution.start.is_some());
}

#[tokio::test]
async fn missing_organizer_degrades_too() {
    let mut event = online_event("E1", JOIN_URL);
    event.organizer = None;
    let graph = FakeGraph::new().with_event(event);

    let resolution = resolver(&graph).resolve(&ResolveRequest::for_event("E1")).await.unwrap();

    assert_eq!(resolution.message, MSG_TRANSCRIPT_UNAVAILABLE);
}

#[tokio::test]
async fn non_matching_join_urls_resolve_negatively() {
    let urls = [
        "https://zoom.us/j/123456",
        "https://teams.microsoft.com/l/meetup-join/19:meeting_abc@thread.v2/0?context=x",
        "https://teams.microsoft.com/l/meetup-join/abc:def@thread.v2",
    ];

    for (index, url) in urls.into_iter().enumerate() {
        let id = format!("E{index}");
        let graph = FakeGraph::new().with_event(online_event(&id, url));

        let resolution = resolver(&graph).resolve(&ResolveRequest::for_event(id)).await.unwrap();

        assert!(!resolution.success, "{url} matched");
        assert_eq!(resolution.message, "Not a valid Teams meeting");
    }
}

#[tokio::test]
async fn encoded_join_url_is_decoded_before_matching() {
    let encoded = "https://teams.microsoft.com/l/meetup-join/19%3ameeting_abc%40thread.v2";
    let graph = FakeGraph::new()
        .with_event(online_event("E1", encoded))
        .with_transcripts("19:meeting_abc@thread.v2", &[("T1", "text")]);

    let resolution = resolver(&graph).resolve(&ResolveRequest::for_event("E1")).await.unwrap();

    assert_eq!(resolution.transcript.as_deref(), Some("text"));
}

#[test]
fn extracted_thread_id_is_exactly_the_matched_segment() {
    for (digits, token) in [("1", "a"), ("1234", "abcXYZ"), ("19", "meeting_Zm9v"), ("007", "_")] {
        let url = format!("https://teams.microsoft.com/l/meetup-join/{digits}:{token}@thread.v2");
        let id = extract_meeting_id(&url).expect("url should match");
        assert_eq!(id.thread_id(), format!("{digits}:{token}"));
    }
}

#[tokio::test]
async fn event_fetch_failure_is_fatal() {
    let graph = FakeGraph::new().failing_events();

    let err = resolver(&graph).resolve(&ResolveRequest::for_event("E1")).await.unwrap_err();

    assert!(matches!(err, ReviewBotError::Provider(_)));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn meeting_url_only_is_not_implemented() {
    let graph = FakeGraph::new();
    let request = ResolveRequest::for_meeting_url("https://teams.microsoft.com/l/meetup-join/x");

    let err = resolver(&graph).resolve(&request).await.unwrap_err();

    assert_eq!(err, ReviewBotError::NotImplemented(MSG_LIVE_JOIN_UNSUPPORTED.to_string()));
    assert_eq!(err.status_code(), 501);
    assert!(graph.calls().is_empty());
}

#[tokio::test]
async fn event_id_takes_precedence_over_meeting_url() {
    let graph = FakeGraph::new().with_event(online_event("E1", JOIN_URL));
    let request = ResolveRequest {
        meeting_url: Some("https://teams.microsoft.com/l/meetup-join/x".to_string()),
        event_id: Some("E1".to_string()),
    };

    let resolution = resolver(&graph).resolve(&request).await.unwrap();

    assert!(resolution.success);
}

#[tokio::test]
async fn missing_identifiers_are_invalid() {
    let graph = FakeGraph::new();
    let request = ResolveRequest { meeting_url: Some("  ".to_string()), event_id: None };

    let err = resolver(&graph).resolve(&request).await.unwrap_err();

    assert!(matches!(err, ReviewBotError::InvalidRequest(_)));
    assert_eq!(err.status_code(), 400);
}
