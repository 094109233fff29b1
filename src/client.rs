//! Social API Client
//!
//! Thin, stateless wrapper over the community site's HTTP API. Every client
//! is built from an injected base URL and `reqwest::Client`; there is no
//! global configuration. Writes are checked with the same validators the
//! server uses, so obviously bad content never leaves the process.
//!
//! Transport failures, timeouts, 429 and 5xx responses are retried with
//! exponential backoff.

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::social::factories::{
    create_comment, create_follow_relationship, create_like, create_message, create_post, follow_id,
};
use crate::social::updaters::update_profile;
use crate::social::validation::{
    validate_comment, validate_follow, validate_message, validate_post, validate_profile,
};
use crate::social::{
    Comment, FeedFilter, FeedItem, FeedRanker, Follow, Like, Message, MessageContentType,
    Notification, Post, PostContentType, ProfileUpdate, UserProfile,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Client for the social API
#[derive(Debug, Clone)]
pub struct SocialClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
}

impl SocialClient {
    /// Client with its own connection pool and default policy
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(Error::from)?;
        Self::with_http_client(http, base_url)
    }

    /// Client over an existing transport
    pub fn with_http_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| Error::Config {
            message: format!("Invalid API base URL '{}'", base_url).into(),
            source: Some(Box::new(e)),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!("API base URL cannot hold paths: {}", base_url)));
        }

        Ok(Self {
            http,
            base_url,
            timeout: DEFAULT_TIMEOUT,
            max_retries: 3,
            retry_delay: Duration::from_millis(250),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::from)?;

        let mut client = Self::with_http_client(http, &config.base_url)?
            .with_retry_policy(config.max_retries, config.retry_delay);
        client.timeout = config.timeout;
        Ok(client)
    }

    pub fn with_retry_policy(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries.max(1);
        self.retry_delay = retry_delay;
        self
    }

    // ========================================================================
    // Feed & posts
    // ========================================================================

    /// Raw feed items for a user, in server order
    #[instrument(skip(self))]
    pub async fn get_feed(&self, user_id: &str) -> Result<Vec<FeedItem>> {
        self.request_json(Method::GET, &["feed", user_id], None, ("feed", user_id))
            .await
    }

    /// Feed items filtered and ordered locally
    #[instrument(skip(self, ranker))]
    pub async fn fetch_ranked_feed(
        &self,
        user_id: &str,
        filter: &FeedFilter,
        ranker: &FeedRanker,
    ) -> Result<Vec<FeedItem>> {
        let items = self.get_feed(user_id).await?;
        Ok(ranker.apply_filter(&items, filter))
    }

    #[instrument(skip(self, content))]
    pub async fn create_post(
        &self,
        author_id: &str,
        content_type: PostContentType,
        content: &str,
        media_url: Option<&str>,
    ) -> Result<Post> {
        if !validate_post(content, content_type) {
            return Err(Error::validation("post", format!("invalid {} content", content_type)));
        }

        let post = create_post(author_id, content_type, content, media_url);
        let body = serde_json::to_value(&post)?;
        let created: Post = self
            .request_json(Method::POST, &["posts"], Some(&body), ("post", post.id.as_str()))
            .await?;

        info!("📝 Created post {} for {}", created.id, author_id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn like_post(&self, post_id: &str, user_id: &str) -> Result<Like> {
        let like = create_like(post_id, user_id);
        let body = serde_json::to_value(&like)?;
        self.request_json(Method::POST, &["posts", post_id, "likes"], Some(&body), ("post", post_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn unlike_post(&self, post_id: &str, user_id: &str) -> Result<()> {
        self.request_empty(
            Method::DELETE,
            &["posts", post_id, "likes", user_id],
            None,
            ("like", post_id),
        )
        .await
    }

    #[instrument(skip(self, content))]
    pub async fn add_comment(&self, post_id: &str, author_id: &str, content: &str) -> Result<Comment> {
        if !validate_comment(content) {
            return Err(Error::validation("comment", "content must be 1..=2000 characters"));
        }

        let comment = create_comment(post_id, author_id, content);
        let body = serde_json::to_value(&comment)?;
        self.request_json(
            Method::POST,
            &["posts", post_id, "comments"],
            Some(&body),
            ("post", post_id),
        )
        .await
    }

    // ========================================================================
    // Follow graph
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn follow_user(&self, follower_id: &str, following_id: &str) -> Result<Follow> {
        if !validate_follow(follower_id, following_id) {
            return Err(Error::validation("follow", "follower and target must be distinct users"));
        }

        let follow = create_follow_relationship(follower_id, following_id);
        let body = serde_json::to_value(&follow)?;
        let created: Follow = self
            .request_json(Method::POST, &["follows"], Some(&body), ("user", following_id))
            .await?;

        info!("🤝 {} now follows {}", follower_id, following_id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn unfollow_user(&self, follower_id: &str, following_id: &str) -> Result<()> {
        if !validate_follow(follower_id, following_id) {
            return Err(Error::validation("follow", "follower and target must be distinct users"));
        }

        let id = follow_id(follower_id, following_id);
        self.request_empty(Method::DELETE, &["follows", id.as_str()], None, ("follow", id.as_str()))
            .await
    }

    // ========================================================================
    // Messaging
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn get_messages(&self, thread_id: &str) -> Result<Vec<Message>> {
        self.request_json(
            Method::GET,
            &["threads", thread_id, "messages"],
            None,
            ("thread", thread_id),
        )
        .await
    }

    #[instrument(skip(self, content))]
    pub async fn send_message(
        &self,
        thread_id: &str,
        sender_id: &str,
        content: &str,
        content_type: MessageContentType,
    ) -> Result<Message> {
        if !validate_message(content, content_type) {
            return Err(Error::validation("message", "invalid message content"));
        }

        let message = create_message(thread_id, sender_id, content, content_type);
        let body = serde_json::to_value(&message)?;
        self.request_json(
            Method::POST,
            &["threads", thread_id, "messages"],
            Some(&body),
            ("thread", thread_id),
        )
        .await
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn get_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        self.request_json(
            Method::GET,
            &["users", user_id, "notifications"],
            None,
            ("user", user_id),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<()> {
        self.request_empty(
            Method::POST,
            &["notifications", notification_id, "read"],
            None,
            ("notification", notification_id),
        )
        .await
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.request_json(Method::GET, &["users", user_id, "profile"], None, ("user", user_id))
            .await
    }

    /// Fetch, merge locally, validate, then store the merged profile
    #[instrument(skip(self, updates))]
    pub async fn update_profile(&self, user_id: &str, updates: ProfileUpdate) -> Result<UserProfile> {
        let current = self.get_profile(user_id).await?;
        let merged = update_profile(&current, updates);
        if !validate_profile(&merged) {
            return Err(Error::validation(
                "profile",
                "display name must be 2..=50 characters and bio at most 500",
            ));
        }

        let body = serde_json::to_value(&merged)?;
        self.request_json(
            Method::PUT,
            &["users", user_id, "profile"],
            Some(&body),
            ("user", user_id),
        )
        .await
    }

    // ========================================================================
    // Transport
    // ========================================================================

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config("API base URL cannot hold paths"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&Value>,
        entity: (&'static str, &str),
    ) -> Result<T> {
        let response = self.execute(method, segments, body, entity).await?;
        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn request_empty(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&Value>,
        entity: (&'static str, &str),
    ) -> Result<()> {
        self.execute(method, segments, body, entity).await?;
        Ok(())
    }

    async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&Value>,
        (entity_type, entity_id): (&'static str, &str),
    ) -> Result<reqwest::Response> {
        let url = self.endpoint(segments)?;
        let operation = format!("{} {}", method, url.path());

        with_retry(
            || async {
                let mut request = self.http.request(method.clone(), url.clone());
                if let Some(body) = body {
                    request = request.json(body);
                }

                let response = request.send().await.map_err(|e| self.transport_error(e))?;
                let status = response.status();
                debug!("{} -> {}", operation, status);

                if status.is_success() {
                    return Ok(response);
                }
                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(Error::not_found(entity_type, entity_id));
                }

                let message = response.text().await.unwrap_or_default();
                Err(Error::Api {
                    status: status.as_u16(),
                    message,
                })
            },
            self.max_retries,
            self.retry_delay,
            &operation,
        )
        .await
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            Error::from(err)
        }
    }
}

/// Retry helper with exponential backoff, capped at 30s between attempts
pub async fn with_retry<T, F, Fut>(
    operation: F,
    max_retries: u32,
    initial_delay: Duration,
    operation_name: &str,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut delay = initial_delay;
    let mut last_error = None;

    for attempt in 0..max_retries {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !e.is_retryable() {
                    return Err(e);
                }

                warn!(
                    "{} failed (attempt {}/{}): {:?}",
                    operation_name,
                    attempt + 1,
                    max_retries,
                    e
                );

                last_error = Some(e);

                if attempt + 1 < max_retries {
                    tokio::time::sleep(delay).await;
                    delay = std::cmp::min(delay * 2, MAX_BACKOFF);
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Error::http(format!("{}: max retries exceeded", operation_name))))
}
