//! Event construction, one function per social action.
//!
//! Each function stamps a fresh v4 event id and the current UTC time. Player
//! ids are taken as given; whether the players exist is not checked here.

use crate::event::{EventData, PlayerId, SocialEvent};
use chrono::Utc;
use uuid::Uuid;

/// `requester_id` sent a friend request to `target_id`.
#[must_use]
pub fn friend_request(requester_id: PlayerId, target_id: PlayerId) -> SocialEvent {
    build(requester_id, EventData::FriendRequest { target_id })
}

/// `acceptor_id` accepted the request previously sent by `requester_id`.
#[must_use]
pub fn friend_accepted(acceptor_id: PlayerId, requester_id: PlayerId) -> SocialEvent {
    build(acceptor_id, EventData::FriendAccepted { requester_id })
}

/// `follower_id` started following `followed_id`.
#[must_use]
pub fn new_follower(follower_id: PlayerId, followed_id: PlayerId) -> SocialEvent {
    build(follower_id, EventData::NewFollower { followed_id })
}

fn build(player_id: PlayerId, data: EventData) -> SocialEvent {
    SocialEvent::new(Uuid::new_v4(), Utc::now(), player_id, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SocialEventType;
    use std::collections::HashSet;

    #[test]
    fn test_friend_request() {
        let event = friend_request(123, 456);

        assert_eq!(event.event_type(), SocialEventType::FriendRequest);
        assert_eq!(event.player_id(), 123);
        assert_eq!(*event.data(), EventData::FriendRequest { target_id: 456 });
    }

    #[test]
    fn test_friend_accepted_is_attributed_to_acceptor() {
        let event = friend_accepted(456, 123);

        assert_eq!(event.event_type(), SocialEventType::FriendAccepted);
        assert_eq!(event.player_id(), 456);
        assert_eq!(
            *event.data(),
            EventData::FriendAccepted { requester_id: 123 }
        );
    }

    #[test]
    fn test_new_follower_is_attributed_to_follower() {
        let event = new_follower(10, 20);

        assert_eq!(event.event_type(), SocialEventType::NewFollower);
        assert_eq!(event.player_id(), 10);
        assert_eq!(*event.data(), EventData::NewFollower { followed_id: 20 });
    }

    #[test]
    fn test_payload_carries_only_action_key() {
        let cases = [
            (friend_request(1, 2), "targetId"),
            (friend_accepted(1, 2), "requesterId"),
            (new_follower(1, 2), "followedId"),
        ];

        for (event, key) in cases {
            let value = serde_json::to_value(&event).unwrap();
            let data = value["eventData"].as_object().unwrap();
            assert_eq!(data.len(), 1);
            assert_eq!(data[key], 2);
        }
    }

    #[test]
    fn test_event_ids_are_unique() {
        let ids: HashSet<_> = (0..200)
            .map(|i| match i % 3 {
                0 => friend_request(i, i + 1),
                1 => friend_accepted(i, i + 1),
                _ => new_follower(i, i + 1),
            })
            .map(|event| event.event_id())
            .collect();

        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_same_player_same_partition_key_across_types() {
        let keys: HashSet<_> = [
            friend_request(77, 1),
            friend_accepted(77, 2),
            new_follower(77, 3),
        ]
        .iter()
        .map(SocialEvent::partition_key)
        .collect();

        assert_eq!(keys.len(), 1);
        assert!(keys.contains("77"));
    }
}
