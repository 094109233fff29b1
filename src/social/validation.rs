//! Content Validators
//!
//! Pure predicates over user-supplied content. They never fail loudly: callers
//! branch on the returned `bool`. Lengths are counted in Unicode scalar values.

use super::models::{MessageContentType, PostContentType, UserProfile};

pub const MAX_POST_LENGTH: usize = 2000;
pub const MAX_COMMENT_LENGTH: usize = 2000;
pub const MAX_MESSAGE_LENGTH: usize = 1000;
pub const MIN_DISPLAY_NAME_LENGTH: usize = 2;
pub const MAX_DISPLAY_NAME_LENGTH: usize = 50;
pub const MAX_BIO_LENGTH: usize = 500;

fn is_valid_text(content: &str, max_len: usize) -> bool {
    !content.trim().is_empty() && content.chars().count() <= max_len
}

/// Media content is an opaque URL or identifier
fn is_valid_media(content: &str) -> bool {
    !content.is_empty()
}

pub fn validate_post(content: &str, content_type: PostContentType) -> bool {
    match content_type {
        PostContentType::Text => is_valid_text(content, MAX_POST_LENGTH),
        PostContentType::Image | PostContentType::Video => is_valid_media(content),
    }
}

pub fn validate_comment(content: &str) -> bool {
    is_valid_text(content, MAX_COMMENT_LENGTH)
}

pub fn validate_message(content: &str, content_type: MessageContentType) -> bool {
    match content_type {
        MessageContentType::Text => is_valid_text(content, MAX_MESSAGE_LENGTH),
        MessageContentType::Voice | MessageContentType::Image => is_valid_media(content),
    }
}

pub fn validate_profile(profile: &UserProfile) -> bool {
    if profile.user_id.is_empty() || profile.display_name.is_empty() {
        return false;
    }

    let name_len = profile.display_name.chars().count();
    (MIN_DISPLAY_NAME_LENGTH..=MAX_DISPLAY_NAME_LENGTH).contains(&name_len)
        && profile.spiritual_bio.chars().count() <= MAX_BIO_LENGTH
}

pub fn validate_follow(follower_id: &str, following_id: &str) -> bool {
    !follower_id.is_empty() && !following_id.is_empty() && follower_id != following_id
}

/// A thread needs at least one participant and no blank ids
pub fn validate_thread<S: AsRef<str>>(participants: &[S]) -> bool {
    !participants.is_empty() && participants.iter().all(|p| !p.as_ref().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::social::factories::{create_profile, create_thread};

    #[test]
    fn test_validate_post_text_bounds() {
        assert!(!validate_post("", PostContentType::Text));
        assert!(!validate_post("   \n\t", PostContentType::Text));
        assert!(validate_post("hello", PostContentType::Text));
        assert!(validate_post(&"a".repeat(2000), PostContentType::Text));
        assert!(!validate_post(&"a".repeat(2001), PostContentType::Text));
    }

    #[test]
    fn test_validate_post_media() {
        assert!(validate_post("https://cdn.example.com/a.png", PostContentType::Image));
        assert!(validate_post(" ", PostContentType::Video));
        assert!(!validate_post("", PostContentType::Video));
        // no length cap on media identifiers
        assert!(validate_post(&"a".repeat(5000), PostContentType::Image));
    }

    #[test]
    fn test_validate_message_limits() {
        assert!(validate_message(&"ॐ".repeat(1000), MessageContentType::Text));
        assert!(!validate_message(&"ॐ".repeat(1001), MessageContentType::Text));
        assert!(validate_message("voice-note-42", MessageContentType::Voice));
        assert!(!validate_message("", MessageContentType::Image));
    }

    #[test]
    fn test_validate_comment() {
        assert!(validate_comment("beautiful energy"));
        assert!(!validate_comment(" "));
        assert!(!validate_comment(&"x".repeat(2001)));
    }

    #[test]
    fn test_validate_profile() {
        let mut profile = create_profile("u1", "Jo");
        assert!(validate_profile(&profile));

        profile.display_name = "J".to_string();
        assert!(!validate_profile(&profile));

        profile.display_name = "x".repeat(51);
        assert!(!validate_profile(&profile));

        profile.display_name = "Jo".to_string();
        profile.spiritual_bio = "b".repeat(501);
        assert!(!validate_profile(&profile));

        profile.spiritual_bio = "b".repeat(500);
        profile.user_id.clear();
        assert!(!validate_profile(&profile));
    }

    #[test]
    fn test_validate_follow() {
        assert!(validate_follow("a", "b"));
        assert!(!validate_follow("a", "a"));
        assert!(!validate_follow("", "b"));
        assert!(!validate_follow("a", ""));
    }

    #[test]
    fn test_validate_thread() {
        let empty: [&str; 0] = [];
        assert!(!validate_thread(&empty));
        assert!(!validate_thread(&["a", ""]));
        assert!(validate_thread(&["a"]));

        let thread = create_thread(&["a", "b", "a"]);
        assert!(validate_thread(&thread.participants));
    }
}
