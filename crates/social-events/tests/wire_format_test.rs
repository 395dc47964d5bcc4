//! Integration tests for the published wire envelope.
//!
//! Consumers outside this repository parse these payloads, so the layout is
//! checked against literal JSON rather than against our own decoder only.

use serde_json::{json, Value};
use social_events::{factory, EventCodec, EventData, JsonCodec, SocialEvent, SocialEventType};
use uuid::Uuid;

fn encode(event: &SocialEvent) -> Value {
    let bytes = JsonCodec.encode(event).expect("Serialization should succeed");
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn test_friend_request_envelope() {
    let event = factory::friend_request(123, 456);
    let wire = encode(&event);

    assert_eq!(wire["category"], "SOCIAL");
    assert_eq!(wire["eventType"], "FRIEND_REQUEST");
    assert_eq!(wire["eventId"], event.event_id().to_string());
    assert_eq!(wire["playerId"], 123);
    assert_eq!(wire["eventData"], json!({ "targetId": 456 }));
    assert_eq!(event.partition_key(), "123");
}

#[test]
fn test_envelope_has_no_extra_fields() {
    let wire = encode(&factory::new_follower(10, 20));
    let mut keys: Vec<&str> = wire.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();

    assert_eq!(
        keys,
        ["category", "eventData", "eventId", "eventType", "playerId", "timestamp"]
    );
}

#[test]
fn test_timestamp_is_iso_8601_text() {
    let event = factory::friend_accepted(456, 123);
    let wire = encode(&event);

    let text = wire["timestamp"].as_str().expect("timestamp is a string");
    let parsed: chrono::DateTime<chrono::Utc> = text.parse().unwrap();
    assert_eq!(parsed, event.timestamp());
}

#[test]
fn test_decode_payload_from_another_producer() {
    let raw = json!({
        "category": "SOCIAL",
        "eventType": "FRIEND_ACCEPTED",
        "eventId": "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee",
        "timestamp": "2026-03-01T08:30:00.250Z",
        "playerId": 456,
        "eventData": { "requesterId": 123 }
    });

    let event = JsonCodec
        .decode(raw.to_string().as_bytes())
        .expect("Deserialization should succeed");

    assert_eq!(
        event.event_id(),
        Uuid::parse_str("aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee").unwrap()
    );
    assert_eq!(event.event_type(), SocialEventType::FriendAccepted);
    assert_eq!(event.player_id(), 456);
    assert_eq!(*event.data(), EventData::FriendAccepted { requester_id: 123 });
}

#[test]
fn test_decode_rejects_unknown_category() {
    let raw = json!({
        "category": "GAME",
        "eventType": "NEW_FOLLOWER",
        "eventId": Uuid::new_v4(),
        "timestamp": "2026-03-01T08:30:00Z",
        "playerId": 10,
        "eventData": { "followedId": 20 }
    });

    assert!(JsonCodec.decode(raw.to_string().as_bytes()).is_err());
}
