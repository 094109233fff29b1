//! Relationship State Updaters
//!
//! Each updater borrows an aggregate, applies one action and returns a new
//! value. Inputs are never mutated and the result never shares collections
//! with the input.
//!
//! These helpers only guarantee correctness for a single, consistent input.
//! Serializing concurrent updates to the same record is the store's job.

use std::collections::HashSet;
use tracing::debug;

use super::factories::create_reaction;
use super::models::{
    Badge, FollowAction, FollowCounter, FollowStats, Message, Notification, ProfileUpdate,
    UserProfile,
};

/// Adjust one follow counter by one. Decrements saturate at zero.
pub fn update_follow_stats(
    stats: &FollowStats,
    action: FollowAction,
    target: FollowCounter,
) -> FollowStats {
    let apply = |count: u32| match action {
        FollowAction::Follow => count.saturating_add(1),
        FollowAction::Unfollow => count.saturating_sub(1),
    };

    let mut next = stats.clone();
    match target {
        FollowCounter::Follower => next.follower_count = apply(stats.follower_count),
        FollowCounter::Following => next.following_count = apply(stats.following_count),
    }

    if action == FollowAction::Unfollow
        && next.follower_count == stats.follower_count
        && next.following_count == stats.following_count
    {
        debug!(user_id = %stats.user_id, ?target, "Follow counter already at zero, decrement clamped");
    }

    next
}

/// Replace any reaction by `user_id` with a new one carrying `emoji`
pub fn add_reaction(message: &Message, user_id: &str, emoji: &str) -> Message {
    let mut reactions: Vec<_> = message
        .reactions
        .iter()
        .filter(|r| r.user_id != user_id)
        .cloned()
        .collect();
    reactions.push(create_reaction(&message.id, user_id, emoji));

    Message {
        reactions,
        ..message.clone()
    }
}

/// Idempotent: an existing reader yields an equal copy
pub fn mark_as_read(message: &Message, user_id: &str) -> Message {
    let mut next = message.clone();
    if !message.is_read_by(user_id) {
        next.read_by.push(user_id.to_string());
    }
    next
}

/// Unread to read, never back
pub fn mark_notification_read(notification: &Notification) -> Notification {
    Notification {
        read: true,
        ..notification.clone()
    }
}

/// No-op copy when a badge with the same id is already present
pub fn add_badge(profile: &UserProfile, badge: Badge) -> UserProfile {
    let mut next = profile.clone();
    if !profile.badges.iter().any(|b| b.id == badge.id) {
        next.badges.push(badge);
    }
    next
}

pub fn add_interest(profile: &UserProfile, interest: &str) -> UserProfile {
    let mut next = profile.clone();
    if !profile.interests.iter().any(|i| i == interest) {
        next.interests.push(interest.to_string());
    }
    next
}

pub fn remove_interest(profile: &UserProfile, interest: &str) -> UserProfile {
    UserProfile {
        interests: profile
            .interests
            .iter()
            .filter(|i| i.as_str() != interest)
            .cloned()
            .collect(),
        ..profile.clone()
    }
}

fn dedup_badges(badges: Vec<Badge>) -> Vec<Badge> {
    let mut seen = HashSet::new();
    badges
        .into_iter()
        .filter(|b| seen.insert(b.id.clone()))
        .collect()
}

fn dedup_interests(interests: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    interests
        .into_iter()
        .filter(|i| seen.insert(i.clone()))
        .collect()
}

/// Merge `updates` over `current`. Replacement badges and interests are
/// deduplicated keeping first-seen order. `user_id` and `join_date` always come from `current`.
pub fn update_profile(current: &UserProfile, updates: ProfileUpdate) -> UserProfile {
    let ProfileUpdate {
        user_id: _,
        join_date: _,
        display_name,
        spiritual_bio,
        astrological_summary,
        ayurvedic_type,
        badges,
        interests,
        avatar_url,
    } = updates;

    UserProfile {
        user_id: current.user_id.clone(),
        join_date: current.join_date,
        display_name: display_name.unwrap_or_else(|| current.display_name.clone()),
        spiritual_bio: spiritual_bio.unwrap_or_else(|| current.spiritual_bio.clone()),
        astrological_summary: astrological_summary
            .unwrap_or_else(|| current.astrological_summary.clone()),
        ayurvedic_type: ayurvedic_type.unwrap_or_else(|| current.ayurvedic_type.clone()),
        badges: badges
            .map(dedup_badges)
            .unwrap_or_else(|| current.badges.clone()),
        interests: interests
            .map(dedup_interests)
            .unwrap_or_else(|| current.interests.clone()),
        avatar_url: avatar_url.or_else(|| current.avatar_url.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::social::factories::{
        create_badge, create_follow_stats, create_message, create_notification, create_profile,
    };
    use crate::social::models::{MessageContentType, NotificationType, SunSign};
    use chrono::{Duration, Utc};

    #[test]
    fn test_follow_stats_increment_and_clamp() {
        let stats = create_follow_stats("u1");

        let up = update_follow_stats(&stats, FollowAction::Follow, FollowCounter::Follower);
        assert_eq!(up.follower_count, 1);
        assert_eq!(up.following_count, 0);

        let down = update_follow_stats(&stats, FollowAction::Unfollow, FollowCounter::Follower);
        assert_eq!(down.follower_count, 0);

        let following = update_follow_stats(&up, FollowAction::Follow, FollowCounter::Following);
        assert_eq!(following.following_count, 1);
        assert_eq!(following.follower_count, 1);
        // input untouched
        assert_eq!(stats.follower_count, 0);
    }

    #[test]
    fn test_add_reaction_replaces_previous() {
        let msg = create_message("t1", "u1", "hi", MessageContentType::Text);
        let once = add_reaction(&msg, "u2", "🙏");
        let twice = add_reaction(&once, "u2", "✨");
        let other = add_reaction(&twice, "u3", "🙏");

        let by_u2: Vec<_> = other.reactions.iter().filter(|r| r.user_id == "u2").collect();
        assert_eq!(by_u2.len(), 1);
        assert_eq!(by_u2[0].emoji, "✨");
        assert_eq!(by_u2[0].message_id, msg.id);
        assert_eq!(other.reactions.len(), 2);
        assert!(msg.reactions.is_empty());
        assert_eq!(once.reactions.len(), 1);
    }

    #[test]
    fn test_mark_as_read_idempotent() {
        let msg = create_message("t1", "u1", "hi", MessageContentType::Text);
        let once = mark_as_read(&msg, "u2");
        let twice = mark_as_read(&once, "u2");
        assert_eq!(once, twice);
        assert_eq!(once.read_by, vec!["u1".to_string(), "u2".to_string()]);

        let sender = mark_as_read(&msg, "u1");
        assert_eq!(sender, msg);
    }

    #[test]
    fn test_mark_notification_read_one_way() {
        let n = create_notification("u1", NotificationType::Follow, "u2", None);
        let read = mark_notification_read(&n);
        assert!(read.read);
        assert!(mark_notification_read(&read).read);
        assert!(!n.read);
    }

    #[test]
    fn test_badges_unique_by_id() {
        let profile = create_profile("u1", "Luna");
        let first = add_badge(&profile, create_badge("healer", "Healer", "First session"));
        let again = add_badge(&first, create_badge("healer", "Healer II", "dup"));
        assert_eq!(again.badges.len(), 1);
        assert_eq!(again.badges[0].name, "Healer");
    }

    #[test]
    fn test_interests_add_remove() {
        let profile = create_profile("u1", "Luna");
        let p = add_interest(&profile, "reiki");
        let p = add_interest(&p, "reiki");
        let p = add_interest(&p, "yoga");
        assert_eq!(p.interests, vec!["reiki", "yoga"]);

        let p = remove_interest(&p, "reiki");
        assert_eq!(p.interests, vec!["yoga"]);
        let p = remove_interest(&p, "absent");
        assert_eq!(p.interests, vec!["yoga"]);
    }

    #[test]
    fn test_update_profile_dedups_collections() {
        let profile = create_profile("u1", "Luna");
        let updates = ProfileUpdate {
            interests: Some(vec![
                "reiki".to_string(),
                "tarot".to_string(),
                "reiki".to_string(),
            ]),
            badges: Some(vec![
                create_badge("b", "Seeker", "first"),
                create_badge("c", "Guide", ""),
                create_badge("b", "Seeker II", "second"),
            ]),
            ..Default::default()
        };

        let merged = update_profile(&profile, updates);
        assert_eq!(merged.interests, vec!["reiki", "tarot"]);
        let ids: Vec<_> = merged.badges.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(merged.badges[0].name, "Seeker");
    }

    #[test]
    fn test_update_profile_preserves_identity() {
        let profile = create_profile("u1", "Luna");
        let updates = ProfileUpdate {
            user_id: Some("other".to_string()),
            join_date: Some(Utc::now() + Duration::days(30)),
            display_name: Some("Luna Star".to_string()),
            astrological_summary: Some(crate::social::models::AstrologicalSummary {
                sun_sign: Some(SunSign::Pisces),
                ..Default::default()
            }),
            ..Default::default()
        };

        let updated = update_profile(&profile, updates);
        assert_eq!(updated.user_id, "u1");
        assert_eq!(updated.join_date, profile.join_date);
        assert_eq!(updated.display_name, "Luna Star");
        assert_eq!(updated.astrological_summary.sun_sign, Some(SunSign::Pisces));
        assert_eq!(updated.spiritual_bio, profile.spiritual_bio);
    }
}
