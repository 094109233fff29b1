//! Social Domain Models
//!
//! Plain records for posts, feed items, messaging, follows, notifications and
//! profiles. Every discriminated field is a closed enum so that each branch
//! point (filtering, validation, scoring) is matched exhaustively.
//!
//! Records are treated as immutable values: the updaters in
//! [`super::updaters`] always return a fresh copy instead of editing in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Discriminators
// ============================================================================

/// Kind of content carried by a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostContentType {
    Text,
    Image,
    Video,
}

impl PostContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostContentType::Text => "text",
            PostContentType::Image => "image",
            PostContentType::Video => "video",
        }
    }
}

impl fmt::Display for PostContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(PostContentType::Text),
            "image" => Ok(PostContentType::Image),
            "video" => Ok(PostContentType::Video),
            other => Err(format!("unknown content type '{}'", other)),
        }
    }
}

/// Kind of content carried by a direct message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageContentType {
    Text,
    Voice,
    Image,
}

/// What triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Follow,
    Message,
    Mention,
    Comment,
    Reaction,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationType::Follow => write!(f, "follow"),
            NotificationType::Message => write!(f, "message"),
            NotificationType::Mention => write!(f, "mention"),
            NotificationType::Comment => write!(f, "comment"),
            NotificationType::Reaction => write!(f, "reaction"),
        }
    }
}

/// Kind of entity a notification points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Post,
    Comment,
    Message,
    Thread,
    User,
}

/// Feed ordering strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Recent,
    Popular,
    Relevant,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Recent => "recent",
            SortBy::Popular => "popular",
            SortBy::Relevant => "relevant",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recent" => Ok(SortBy::Recent),
            "popular" => Ok(SortBy::Popular),
            "relevant" => Ok(SortBy::Relevant),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// Direction of a follow-graph change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowAction {
    Follow,
    Unfollow,
}

/// Which counter of [`FollowStats`] a change applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowCounter {
    Follower,
    Following,
}

/// Western zodiac sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SunSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// Ayurvedic constitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

// ============================================================================
// Content
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub content_type: PostContentType,
    /// Body text for text posts, media URL/identifier otherwise
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Denormalized view of a post with its engagement counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// Same as the source post id
    pub id: String,
    pub author_id: String,
    pub content_type: PostContentType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub share_count: u32,
    pub created_at: DateTime<Utc>,
}

impl FeedItem {
    /// Build a feed item from a stored post and its aggregated counts
    pub fn from_post(post: &Post, like_count: u32, comment_count: u32, share_count: u32) -> Self {
        Self {
            id: post.id.clone(),
            author_id: post.author_id.clone(),
            content_type: post.content_type,
            content: post.content.clone(),
            media_url: post.media_url.clone(),
            like_count,
            comment_count,
            share_count,
            created_at: post.created_at,
        }
    }

    /// Likes plus comments; shares are not counted
    pub fn engagement(&self) -> u64 {
        u64::from(self.like_count) + u64::from(self.comment_count)
    }
}

/// Feed request options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedFilter {
    /// Empty means every content type
    #[serde(default)]
    pub content_types: Vec<PostContentType>,
    #[serde(default)]
    pub sort_by: SortBy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Messaging
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: String,
    /// Unique user ids, first-seen order
    pub participants: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReaction {
    pub id: String,
    pub message_id: String,
    pub user_id: String,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub thread_id: String,
    pub sender_id: String,
    pub content: String,
    pub content_type: MessageContentType,
    /// At most one entry per user
    #[serde(default)]
    pub reactions: Vec<MessageReaction>,
    /// Always contains the sender
    #[serde(default)]
    pub read_by: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn is_read_by(&self, user_id: &str) -> bool {
        self.read_by.iter().any(|u| u == user_id)
    }
}

// ============================================================================
// Follow graph & notifications
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    /// `{followerId}-{followingId}`
    pub id: String,
    pub follower_id: String,
    pub following_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStats {
    pub user_id: String,
    pub follower_count: u32,
    pub following_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub recipient_id: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub actor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Per-user opt-in switches for each notification type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub follows: bool,
    pub messages: bool,
    pub mentions: bool,
    pub comments: bool,
    pub reactions: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            follows: true,
            messages: true,
            mentions: true,
            comments: true,
            reactions: true,
        }
    }
}

impl NotificationPreferences {
    pub fn allows(&self, notification_type: NotificationType) -> bool {
        match notification_type {
            NotificationType::Follow => self.follows,
            NotificationType::Message => self.messages,
            NotificationType::Mention => self.mentions,
            NotificationType::Comment => self.comments,
            NotificationType::Reaction => self.reactions,
        }
    }
}

// ============================================================================
// Profiles
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstrologicalSummary {
    #[serde(default)]
    pub sun_sign: Option<SunSign>,
    #[serde(default)]
    pub moon_sign: Option<SunSign>,
    #[serde(default)]
    pub rising_sign: Option<SunSign>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AyurvedicType {
    #[serde(default)]
    pub primary_dosha: Option<Dosha>,
    #[serde(default)]
    pub secondary_dosha: Option<Dosha>,
}

/// Achievement marker, unique by `id` within a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub awarded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub spiritual_bio: String,
    #[serde(default)]
    pub astrological_summary: AstrologicalSummary,
    #[serde(default)]
    pub ayurvedic_type: AyurvedicType,
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub join_date: DateTime<Utc>,
}

/// Field-wise profile changes. `user_id` and `join_date` are accepted so that
/// whole-profile payloads deserialize, but they are never applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub user_id: Option<String>,
    pub display_name: Option<String>,
    pub spiritual_bio: Option<String>,
    pub astrological_summary: Option<AstrologicalSummary>,
    pub ayurvedic_type: Option<AyurvedicType>,
    pub badges: Option<Vec<Badge>>,
    pub interests: Option<Vec<String>>,
    pub avatar_url: Option<String>,
    pub join_date: Option<DateTime<Utc>>,
}

/// Account aggregate; owns its profile, stats and preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub profile: UserProfile,
    pub follow_stats: FollowStats,
    #[serde(default)]
    pub notification_preferences: NotificationPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
