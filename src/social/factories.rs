//! Entity Factories
//!
//! Build well-formed records with fresh identifiers and timestamps. Inputs are
//! borrowed and never modified; content checks live in [`super::validation`].

use chrono::Utc;
use uuid::Uuid;

use super::models::{
    AstrologicalSummary, AyurvedicType, Badge, Comment, EntityType, Follow, FollowStats, Like,
    Message, MessageContentType, MessageReaction, Notification, NotificationPreferences,
    NotificationType, Post, PostContentType, Thread, User, UserProfile,
};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn create_post(
    author_id: &str,
    content_type: PostContentType,
    content: &str,
    media_url: Option<&str>,
) -> Post {
    let now = Utc::now();
    Post {
        id: new_id(),
        author_id: author_id.to_string(),
        content_type,
        content: content.to_string(),
        media_url: media_url.map(str::to_string),
        created_at: now,
        updated_at: now,
    }
}

pub fn create_like(post_id: &str, user_id: &str) -> Like {
    Like {
        id: new_id(),
        post_id: post_id.to_string(),
        user_id: user_id.to_string(),
        created_at: Utc::now(),
    }
}

pub fn create_comment(post_id: &str, author_id: &str, content: &str) -> Comment {
    let now = Utc::now();
    Comment {
        id: new_id(),
        post_id: post_id.to_string(),
        author_id: author_id.to_string(),
        content: content.to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// Participants are de-duplicated, keeping first-seen order
pub fn create_thread<S: AsRef<str>>(participants: &[S]) -> Thread {
    let mut unique: Vec<String> = Vec::with_capacity(participants.len());
    for p in participants {
        let p = p.as_ref();
        if !unique.iter().any(|u| u == p) {
            unique.push(p.to_string());
        }
    }

    let now = Utc::now();
    Thread {
        id: new_id(),
        participants: unique,
        created_at: now,
        updated_at: now,
    }
}

/// New message, already read by its sender
pub fn create_message(
    thread_id: &str,
    sender_id: &str,
    content: &str,
    content_type: MessageContentType,
) -> Message {
    Message {
        id: new_id(),
        thread_id: thread_id.to_string(),
        sender_id: sender_id.to_string(),
        content: content.to_string(),
        content_type,
        reactions: Vec::new(),
        read_by: vec![sender_id.to_string()],
        created_at: Utc::now(),
    }
}

pub fn create_reaction(message_id: &str, user_id: &str, emoji: &str) -> MessageReaction {
    MessageReaction {
        id: new_id(),
        message_id: message_id.to_string(),
        user_id: user_id.to_string(),
        emoji: emoji.to_string(),
        created_at: Utc::now(),
    }
}

/// Composite id of a follow edge; the same ordered pair always maps to the same id
pub fn follow_id(follower_id: &str, following_id: &str) -> String {
    format!("{}-{}", follower_id, following_id)
}

pub fn create_follow_relationship(follower_id: &str, following_id: &str) -> Follow {
    Follow {
        id: follow_id(follower_id, following_id),
        follower_id: follower_id.to_string(),
        following_id: following_id.to_string(),
        created_at: Utc::now(),
    }
}

pub fn create_follow_stats(user_id: &str) -> FollowStats {
    FollowStats {
        user_id: user_id.to_string(),
        follower_count: 0,
        following_count: 0,
    }
}

pub fn create_notification(
    recipient_id: &str,
    notification_type: NotificationType,
    actor_id: &str,
    entity: Option<(&str, EntityType)>,
) -> Notification {
    Notification {
        id: new_id(),
        recipient_id: recipient_id.to_string(),
        notification_type,
        actor_id: actor_id.to_string(),
        entity_id: entity.map(|(id, _)| id.to_string()),
        entity_type: entity.map(|(_, t)| t),
        read: false,
        created_at: Utc::now(),
    }
}

/// Default profile for a freshly created account
pub fn create_profile(user_id: &str, display_name: &str) -> UserProfile {
    UserProfile {
        user_id: user_id.to_string(),
        display_name: display_name.to_string(),
        spiritual_bio: String::new(),
        astrological_summary: AstrologicalSummary::default(),
        ayurvedic_type: AyurvedicType::default(),
        badges: Vec::new(),
        interests: Vec::new(),
        avatar_url: None,
        join_date: Utc::now(),
    }
}

pub fn create_badge(id: &str, name: &str, description: &str) -> Badge {
    Badge {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        awarded_at: Utc::now(),
    }
}

/// Account with default profile, zeroed follow stats and every notification enabled
pub fn create_user(id: &str, email: &str, display_name: &str) -> User {
    let profile = create_profile(id, display_name);
    let now = profile.join_date;
    User {
        id: id.to_string(),
        email: email.to_string(),
        profile,
        follow_stats: create_follow_stats(id),
        notification_preferences: NotificationPreferences::default(),
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_id_is_directional() {
        let ab = create_follow_relationship("a", "b");
        let ba = create_follow_relationship("b", "a");
        assert_eq!(ab.id, "a-b");
        assert_eq!(ba.id, "b-a");
        assert_ne!(ab.id, ba.id);
    }

    #[test]
    fn test_thread_participants_deduplicated() {
        let thread = create_thread(&["u1", "u2", "u1", "u3", "u2"]);
        assert_eq!(thread.participants, vec!["u1", "u2", "u3"]);
    }

    #[test]
    fn test_message_read_by_sender() {
        let msg = create_message("t1", "u1", "namaste", MessageContentType::Text);
        assert_eq!(msg.read_by, vec!["u1".to_string()]);
        assert!(msg.reactions.is_empty());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = create_post("u1", PostContentType::Text, "one", None);
        let b = create_post("u1", PostContentType::Text, "one", None);
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn test_create_user_defaults() {
        let user = create_user("u1", "u1@example.com", "Luna");
        assert_eq!(user.profile.user_id, "u1");
        assert_eq!(user.follow_stats, create_follow_stats("u1"));
        assert!(user.notification_preferences.follows);
        assert_eq!(user.created_at, user.profile.join_date);
    }

    #[test]
    fn test_notification_entity_reference() {
        let n = create_notification("u1", NotificationType::Comment, "u2", Some(("c1", EntityType::Comment)));
        assert_eq!(n.entity_id.as_deref(), Some("c1"));
        assert_eq!(n.entity_type, Some(EntityType::Comment));
        assert!(!n.read);
    }
}
