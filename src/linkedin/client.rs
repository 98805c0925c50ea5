use chrono::{Duration as ChronoDuration, Utc};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::LinkedInConfig;

use super::error::ApiError;
use super::transport::{ApiTransport, HttpTransport};
use super::types::{decode_comments, decode_posts, Comment, Post, Profile};

/// Client for the handful of LinkedIn v2 endpoints the monitor uses.
pub struct LinkedInClient<T = HttpTransport> {
    transport: T,
    base_url: String,
    access_token: Option<SecretString>,
    rate_limit_delay: Duration,
    max_rate_limit_retries: u32,
    posts_page_size: u32,
    comments_page_size: u32,
}

impl LinkedInClient<HttpTransport> {
    pub fn new(config: &LinkedInConfig) -> Self {
        Self::with_transport(HttpTransport::new(), config)
    }
}

impl<T: ApiTransport> LinkedInClient<T> {
    pub fn with_transport(transport: T, config: &LinkedInConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            rate_limit_delay: Duration::from_secs(config.rate_limit_delay_secs),
            max_rate_limit_retries: config.max_rate_limit_retries,
            posts_page_size: config.posts_page_size,
            comments_page_size: config.comments_page_size,
        }
    }

    /// GETs `endpoint` and decodes the JSON body.
    ///
    /// On 429 the request is resent after the configured delay, at most
    /// `max_rate_limit_retries` times.
    pub async fn get_json(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, ApiError> {
        let token = self.access_token.as_ref().ok_or(ApiError::MissingToken)?;
        let url = format!("{}{}", self.base_url, endpoint);

        let mut retries = 0;
        loop {
            debug!("GET {}", url);
            let response = self.transport.get(&url, token.expose_secret(), query).await?;

            if response.status == StatusCode::TOO_MANY_REQUESTS {
                if retries >= self.max_rate_limit_retries {
                    return Err(ApiError::RateLimited {
                        attempts: retries + 1,
                    });
                }
                retries += 1;
                warn!(
                    "Rate limit reached. Waiting {} seconds (retry {}/{})",
                    self.rate_limit_delay.as_secs(),
                    retries,
                    self.max_rate_limit_retries
                );
                tokio::time::sleep(self.rate_limit_delay).await;
                continue;
            }

            if !response.status.is_success() {
                return Err(ApiError::Status {
                    status: response.status,
                    body: response.body,
                });
            }

            return Ok(serde_json::from_str(&response.body)?);
        }
    }

    pub async fn profile(&self) -> Result<Profile, ApiError> {
        let payload = self.get_json("/people/~", &[]).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Posts by `author_urn` created in the last `days` days. Posts without a
    /// creation time are kept.
    pub async fn recent_posts(&self, author_urn: &str, days: u32) -> Result<Vec<Post>, ApiError> {
        let query = [
            ("q", "author".to_string()),
            ("author", author_urn.to_string()),
            ("start", "0".to_string()),
            ("count", self.posts_page_size.to_string()),
        ];
        let payload = self.get_json("/shares", &query).await?;

        let cutoff = Utc::now() - ChronoDuration::days(i64::from(days));
        let posts: Vec<Post> = decode_posts(payload)
            .into_iter()
            .filter(|post| post.created_at.map_or(true, |at| at >= cutoff))
            .collect();

        debug!("Fetched {} posts within {} days", posts.len(), days);
        Ok(posts)
    }

    pub async fn post_comments(&self, post_id: &str) -> Result<Vec<Comment>, ApiError> {
        let endpoint = format!("/socialActions/{}/comments", urlencoding::encode(post_id));
        let query = [
            ("q", "post".to_string()),
            ("post", post_id.to_string()),
            ("start", "0".to_string()),
            ("count", self.comments_page_size.to_string()),
        ];
        let payload = self.get_json(&endpoint, &query).await?;
        Ok(decode_comments(payload, post_id))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::linkedin::transport::RawResponse;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses and records every requested URL.
    #[derive(Default)]
    pub(crate) struct ScriptedTransport {
        responses: Mutex<VecDeque<(u16, String)>>,
        pub(crate) requests: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new(responses: Vec<(u16, &str)>) -> Self {
            Self {
                responses: Mutex::new(
                    responses
                        .into_iter()
                        .map(|(status, body)| (status, body.to_string()))
                        .collect(),
                ),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Number of requests sent so far.
        pub(crate) fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl ApiTransport for ScriptedTransport {
        async fn get(
            &self,
            url: &str,
            _token: &str,
            _query: &[(&str, String)],
        ) -> Result<RawResponse, ApiError> {
            self.requests.lock().unwrap().push(url.to_string());
            let (status, body) = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or((200, "{}".to_string()));
            Ok(RawResponse {
                status: StatusCode::from_u16(status).unwrap(),
                body,
            })
        }
    }

    pub(crate) fn config_with_token() -> LinkedInConfig {
        LinkedInConfig {
            access_token: Some(SecretString::from("test-token")),
            ..LinkedInConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_then_success_retries_once() {
        let transport = ScriptedTransport::new(vec![(429, ""), (200, r#"{"id":"abc"}"#)]);
        let client = LinkedInClient::with_transport(transport, &config_with_token());

        let started = tokio::time::Instant::now();
        let profile = client.profile().await.unwrap();

        assert_eq!(profile.id, "abc");
        assert_eq!(client.transport.call_count(), 2);
        let waited = started.elapsed();
        assert!(waited >= Duration::from_secs(60), "waited {:?}", waited);
        assert!(waited < Duration::from_secs(120), "waited {:?}", waited);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_retries_are_bounded() {
        let transport = ScriptedTransport::new(vec![(429, ""); 10]);
        let client = LinkedInClient::with_transport(transport, &config_with_token());

        let err = client.get_json("/people/~", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::RateLimited { attempts: 4 }));
        assert_eq!(client.transport.call_count(), 4);
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_sending() {
        let client = LinkedInClient::with_transport(ScriptedTransport::default(), &LinkedInConfig::default());
        let err = client.profile().await.unwrap_err();
        assert!(err.is_config());
        assert_eq!(client.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_error_status_is_not_retried() {
        let transport = ScriptedTransport::new(vec![(403, "ACCESS_DENIED")]);
        let client = LinkedInClient::with_transport(transport, &config_with_token());

        match client.profile().await {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(body, "ACCESS_DENIED");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(client.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_recent_posts_filters_by_window() {
        let now = Utc::now().timestamp_millis();
        let old = now - 30 * 24 * 60 * 60 * 1000;
        let body = format!(
            r#"{{"elements":[
                {{"id":"new","created":{{"time":{now}}}}},
                {{"id":"old","created":{{"time":{old}}}}},
                {{"id":"undated"}}
            ]}}"#
        );
        let transport = ScriptedTransport::new(vec![(200, body.as_str())]);
        let client = LinkedInClient::with_transport(transport, &config_with_token());

        let posts = client.recent_posts("urn:li:person:abc", 7).await.unwrap();
        let ids: Vec<_> = posts.iter().map(|p| p.post_id.as_str()).collect();
        assert_eq!(ids, vec!["new", "undated"]);
        assert_eq!(
            client.transport.requests.lock().unwrap()[0],
            "https://api.linkedin.com/v2/shares"
        );
    }

    #[tokio::test]
    async fn test_post_comments_encodes_post_id() {
        let transport = ScriptedTransport::new(vec![(
            200,
            r#"{"elements":[{"id":"c1","message":{"text":"Congrats!"}}]}"#,
        )]);
        let client = LinkedInClient::with_transport(transport, &config_with_token());

        let comments = client.post_comments("urn:li:share:1").await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].post_id, "urn:li:share:1");
        assert_eq!(
            client.transport.requests.lock().unwrap()[0],
            "https://api.linkedin.com/v2/socialActions/urn%3Ali%3Ashare%3A1/comments"
        );
    }
}
