use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub post_id: String,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub author_name: String,
    pub comments_count: u64,
    pub likes_count: u64,
    pub shares_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub comment_id: String,
    pub author_name: String,
    pub author_id: String,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub post_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub id: String,
    #[serde(rename = "localizedFirstName")]
    pub first_name: String,
    #[serde(rename = "localizedLastName")]
    pub last_name: String,
}

impl Profile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Person URN used as the author filter for the shares query.
    pub fn urn(&self) -> Option<String> {
        (!self.id.is_empty()).then(|| format!("urn:li:person:{}", self.id))
    }
}

// Wire shapes. Every field is optional so a missing key maps to a default
// instead of failing the element.

#[derive(Debug, Default, Deserialize)]
struct Elements {
    #[serde(default)]
    elements: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct TextField {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Stamp {
    /// Milliseconds since the epoch.
    time: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SocialCounts {
    num_comments: Option<u64>,
    num_likes: Option<u64>,
    num_shares: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePost {
    id: Option<String>,
    text: Option<TextField>,
    created: Option<Stamp>,
    author: Option<String>,
    total_social_activity_counts: Option<SocialCounts>,
}

#[derive(Debug, Default, Deserialize)]
struct Actor {
    name: Option<String>,
    id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireComment {
    id: Option<String>,
    actor: Option<Actor>,
    message: Option<TextField>,
    created: Option<Stamp>,
}

fn timestamp(stamp: Option<Stamp>) -> Option<DateTime<Utc>> {
    stamp
        .and_then(|s| s.time)
        .and_then(DateTime::from_timestamp_millis)
}

impl From<WirePost> for Post {
    fn from(wire: WirePost) -> Self {
        let counts = wire.total_social_activity_counts.unwrap_or_default();
        Self {
            post_id: wire.id.unwrap_or_default(),
            content: wire.text.and_then(|t| t.text).unwrap_or_default(),
            created_at: timestamp(wire.created),
            author_name: wire.author.unwrap_or_default(),
            comments_count: counts.num_comments.unwrap_or(0),
            likes_count: counts.num_likes.unwrap_or(0),
            shares_count: counts.num_shares.unwrap_or(0),
        }
    }
}

impl Comment {
    fn from_wire(wire: WireComment, post_id: &str) -> Self {
        let actor = wire.actor.unwrap_or_default();
        Self {
            comment_id: wire.id.unwrap_or_default(),
            author_name: actor.name.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            author_id: actor.id.unwrap_or_default(),
            content: wire.message.and_then(|m| m.text).unwrap_or_default(),
            created_at: timestamp(wire.created),
            post_id: post_id.to_string(),
        }
    }
}

/// Decodes each entry of `elements` on its own, skipping the ones that
/// don't fit `W` at all.
fn decode_elements<W: DeserializeOwned>(payload: serde_json::Value, what: &str) -> Vec<W> {
    let elements = serde_json::from_value::<Elements>(payload)
        .map(|e| e.elements)
        .unwrap_or_else(|e| {
            warn!("Response has no usable {} list: {}", what, e);
            Vec::new()
        });

    elements
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(wire) => Some(wire),
            Err(e) => {
                warn!("Error parsing {} data: {}", what, e);
                None
            }
        })
        .collect()
}

pub fn decode_posts(payload: serde_json::Value) -> Vec<Post> {
    decode_elements::<WirePost>(payload, "post")
        .into_iter()
        .map(Post::from)
        .collect()
}

pub fn decode_comments(payload: serde_json::Value, post_id: &str) -> Vec<Comment> {
    decode_elements::<WireComment>(payload, "comment")
        .into_iter()
        .map(|wire| Comment::from_wire(wire, post_id))
        .collect()
}
