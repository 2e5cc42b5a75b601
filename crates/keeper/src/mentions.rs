//! Mention source client
//!
//! The social platform is a black box behind [`MentionSource`]: a recent
//! search for posts addressed to the bot handle, and a best-effort reply
//! sink. Reply failures are logged, never fatal.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use launchpad_types::{LaunchError, LaunchResult, Mention};

#[async_trait]
pub trait MentionSource: Send + Sync {
    /// Fetch mentions newer than `since_id`, bounded by `limit`.
    async fn fetch_mentions(
        &self,
        since_id: Option<&str>,
        limit: usize,
    ) -> LaunchResult<Vec<Mention>>;

    /// Best-effort reply to a mention.
    async fn reply(&self, mention_id: &str, text: &str) -> LaunchResult<()>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<ApiPost>,
    includes: Option<ApiIncludes>,
}

#[derive(Deserialize)]
struct ApiPost {
    id: String,
    text: String,
    author_id: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct ApiIncludes {
    #[serde(default)]
    users: Vec<ApiUser>,
}

#[derive(Deserialize)]
struct ApiUser {
    id: String,
    username: String,
}

/// v2-style search API client with bearer auth.
pub struct HttpMentionSource {
    api_base: String,
    bearer_token: Option<String>,
    handle: String,
    trigger: String,
    client: reqwest::Client,
}

const REQUEST_TIMEOUT_SECS: u64 = 15;

impl HttpMentionSource {
    pub fn new(
        api_base: impl Into<String>,
        bearer_token: Option<String>,
        handle: impl Into<String>,
        trigger: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            api_base: api_base.into(),
            bearer_token,
            handle: handle.into(),
            trigger: trigger.into(),
            client,
        }
    }

    fn token(&self) -> LaunchResult<&str> {
        self.bearer_token.as_deref().ok_or_else(|| {
            LaunchError::Config("mention source bearer token not configured".into())
        })
    }
}

#[async_trait]
impl MentionSource for HttpMentionSource {
    async fn fetch_mentions(
        &self,
        since_id: Option<&str>,
        limit: usize,
    ) -> LaunchResult<Vec<Mention>> {
        let token = self.token()?;
        let url = format!(
            "{}/2/tweets/search/recent",
            self.api_base.trim_end_matches('/')
        );
        let query = format!("@{} {} -is:retweet", self.handle, self.trigger);
        let max_results = limit.clamp(10, 100).to_string();

        let mut params: Vec<(&str, &str)> = vec![
            ("query", &query),
            ("max_results", &max_results),
            ("tweet.fields", "created_at,author_id"),
            ("expansions", "author_id"),
            ("user.fields", "username"),
        ];
        if let Some(since) = since_id {
            params.push(("since_id", since));
        }

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&params)
            .send()
            .await
            .map_err(|e| LaunchError::Rpc(format!("mention search failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(LaunchError::Rpc(format!(
                "mention search returned {status}: {}",
                detail.chars().take(200).collect::<String>()
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| LaunchError::Rpc(format!("malformed mention search response: {e}")))?;

        let users = parsed.includes.map(|i| i.users).unwrap_or_default();
        let mut mentions = Vec::with_capacity(parsed.data.len());
        for post in parsed.data {
            let Some(author_id) = post.author_id else {
                continue;
            };
            let Some(author) = users.iter().find(|u| u.id == author_id) else {
                continue;
            };
            let url = format!("https://twitter.com/{}/status/{}", author.username, post.id);
            mentions.push(Mention {
                id: post.id,
                text: post.text,
                author_id,
                author_handle: author.username.clone(),
                created_at: post.created_at.unwrap_or_else(Utc::now),
                url,
            });
        }

        debug!(count = mentions.len(), "fetched mentions");
        Ok(mentions)
    }

    async fn reply(&self, mention_id: &str, text: &str) -> LaunchResult<()> {
        let Ok(token) = self.token() else {
            warn!("cannot reply: mention source credentials not configured");
            return Ok(());
        };

        let url = format!("{}/2/tweets", self.api_base.trim_end_matches('/'));
        let body = json!({
            "text": text,
            "reply": { "in_reply_to_tweet_id": mention_id },
        });

        match self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => {
                warn!(
                    mention_id,
                    status = %response.status(),
                    "reply rejected by mention source"
                );
                Ok(())
            }
            Err(e) => {
                warn!(mention_id, "reply failed: {e}");
                Ok(())
            }
        }
    }
}
