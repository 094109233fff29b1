//! Follow Workflow and Notification Gating
//!
//! Composes the factories, validators and updaters into the two follow-graph
//! transitions the API layer performs. Each call returns fresh `User` values
//! for both sides; persisting them (and refusing duplicate follows or
//! unfollows) stays with the caller's store.

use chrono::Utc;
use tracing::debug;

use super::factories::{create_follow_relationship, create_notification, follow_id};
use super::models::{
    EntityType, Follow, FollowAction, FollowCounter, Notification, NotificationPreferences,
    NotificationType, User,
};
use super::updaters::update_follow_stats;
use super::validation::validate_follow;

/// Result of a follow action
#[derive(Debug, Clone)]
pub struct FollowOutcome {
    pub follow: Follow,
    /// Follower with `following_count` incremented
    pub follower: User,
    /// Target with `follower_count` incremented
    pub following: User,
    /// `None` when the target muted follow notifications
    pub notification: Option<Notification>,
}

/// Result of an unfollow action
#[derive(Debug, Clone)]
pub struct UnfollowOutcome {
    /// Composite id of the follow record to delete
    pub follow_id: String,
    pub follower: User,
    pub following: User,
}

/// Create a notification unless the recipient opted out or is the actor
pub fn notify(
    prefs: &NotificationPreferences,
    recipient_id: &str,
    notification_type: NotificationType,
    actor_id: &str,
    entity: Option<(&str, EntityType)>,
) -> Option<Notification> {
    if recipient_id == actor_id {
        return None;
    }
    if !prefs.allows(notification_type) {
        debug!(recipient_id, %notification_type, "Notification suppressed by preferences");
        return None;
    }
    Some(create_notification(recipient_id, notification_type, actor_id, entity))
}

fn with_stats(user: &User, action: FollowAction, counter: FollowCounter) -> User {
    User {
        follow_stats: update_follow_stats(&user.follow_stats, action, counter),
        updated_at: Utc::now(),
        ..user.clone()
    }
}

/// `follower` starts following `following`. `None` for an invalid pair.
pub fn follow(follower: &User, following: &User) -> Option<FollowOutcome> {
    if !validate_follow(&follower.id, &following.id) {
        debug!(follower = %follower.id, following = %following.id, "Rejected follow pair");
        return None;
    }

    let follow = create_follow_relationship(&follower.id, &following.id);
    let notification = notify(
        &following.notification_preferences,
        &following.id,
        NotificationType::Follow,
        &follower.id,
        Some((&follower.id, EntityType::User)),
    );

    Some(FollowOutcome {
        follower: with_stats(follower, FollowAction::Follow, FollowCounter::Following),
        following: with_stats(following, FollowAction::Follow, FollowCounter::Follower),
        follow,
        notification,
    })
}

/// `follower` stops following `following`. `None` for an invalid pair.
pub fn unfollow(follower: &User, following: &User) -> Option<UnfollowOutcome> {
    if !validate_follow(&follower.id, &following.id) {
        return None;
    }

    Some(UnfollowOutcome {
        follow_id: follow_id(&follower.id, &following.id),
        follower: with_stats(follower, FollowAction::Unfollow, FollowCounter::Following),
        following: with_stats(following, FollowAction::Unfollow, FollowCounter::Follower),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::social::factories::create_user;

    #[test]
    fn test_follow_updates_both_sides() {
        let a = create_user("a", "a@example.com", "Asha");
        let b = create_user("b", "b@example.com", "Bodhi");

        let outcome = follow(&a, &b).expect("valid pair");
        assert_eq!(outcome.follow.id, "a-b");
        assert_eq!(outcome.follower.follow_stats.following_count, 1);
        assert_eq!(outcome.follower.follow_stats.follower_count, 0);
        assert_eq!(outcome.following.follow_stats.follower_count, 1);

        let n = outcome.notification.expect("notification");
        assert_eq!(n.recipient_id, "b");
        assert_eq!(n.actor_id, "a");
        assert_eq!(n.notification_type, NotificationType::Follow);

        // inputs untouched
        assert_eq!(a.follow_stats.following_count, 0);
    }

    #[test]
    fn test_self_follow_rejected() {
        let a = create_user("a", "a@example.com", "Asha");
        assert!(follow(&a, &a).is_none());
        assert!(unfollow(&a, &a).is_none());
    }

    #[test]
    fn test_muted_follow_notification() {
        let a = create_user("a", "a@example.com", "Asha");
        let mut b = create_user("b", "b@example.com", "Bodhi");
        b.notification_preferences.follows = false;

        let outcome = follow(&a, &b).expect("valid pair");
        assert!(outcome.notification.is_none());
    }

    #[test]
    fn test_unfollow_clamps_at_zero() {
        let a = create_user("a", "a@example.com", "Asha");
        let b = create_user("b", "b@example.com", "Bodhi");

        let followed = follow(&a, &b).unwrap();
        let once = unfollow(&followed.follower, &followed.following).unwrap();
        assert_eq!(once.follow_id, "a-b");
        assert_eq!(once.follower.follow_stats.following_count, 0);
        assert_eq!(once.following.follow_stats.follower_count, 0);

        let twice = unfollow(&once.follower, &once.following).unwrap();
        assert_eq!(twice.follower.follow_stats.following_count, 0);
        assert_eq!(twice.following.follow_stats.follower_count, 0);
    }

    #[test]
    fn test_notify_skips_self() {
        let prefs = NotificationPreferences::default();
        assert!(notify(&prefs, "u1", NotificationType::Reaction, "u1", None).is_none());
        assert!(notify(&prefs, "u1", NotificationType::Reaction, "u2", None).is_some());
    }
}
