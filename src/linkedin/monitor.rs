use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::storage::StateFile;
use crate::sync::{CommentSnapshot, CommentState};

use super::client::LinkedInClient;
use super::error::ApiError;
use super::transport::ApiTransport;
use super::types::{Comment, Post, Profile};

/// Finds comments on the user's recent posts that the last run didn't see.
pub struct LinkedInMonitor<T> {
    client: LinkedInClient<T>,
    state: StateFile,
    previous: CommentState,
    person_urn: Option<String>,
}

impl<T: ApiTransport> LinkedInMonitor<T> {
    /// Loads the per-post comment ids saved by the previous run.
    pub fn new(client: LinkedInClient<T>, config: &AppConfig) -> Self {
        let state = StateFile::new(&config.storage.comments_state_file);
        let previous: CommentState = state.load();
        debug!("Loaded comment state for {} posts", previous.len());

        Self {
            client,
            state,
            previous,
            person_urn: config.linkedin.person_urn.clone(),
        }
    }

    /// Confirms the token works by fetching the caller's profile.
    pub async fn check_credentials(&self) -> Result<Profile, ApiError> {
        let profile = self.client.profile().await?;
        info!("LinkedIn API connection successful");
        Ok(profile)
    }

    /// Recent posts by the configured author, or by `profile` when no URN
    /// is configured. Transport failures yield no posts.
    pub async fn recent_posts(&self, profile: &Profile, days: u32) -> Result<Vec<Post>> {
        let Some(urn) = self.person_urn.clone().or_else(|| profile.urn()) else {
            warn!("No author URN configured and the profile has no id; skipping posts");
            return Ok(Vec::new());
        };

        match self.client.recent_posts(&urn, days).await {
            Ok(posts) => {
                info!("Found {} posts from the past {} days", posts.len(), days);
                Ok(posts)
            }
            Err(e) if e.is_config() => Err(e.into()),
            Err(e) => {
                error!("Failed to fetch posts: {:#}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Comments on `posts` that are new since the last run. The per-post
    /// state is replaced with what this run saw and saved before returning;
    /// a failed save is logged and the comments are still returned.
    pub async fn find_new_comments(&mut self, posts: &[Post]) -> Result<Vec<Comment>> {
        let mut snapshot = CommentSnapshot::new(self.previous.clone());
        let mut fresh = Vec::new();

        for post in posts {
            let comments = match self.client.post_comments(&post.post_id).await {
                Ok(comments) => comments,
                Err(e) if e.is_config() => return Err(e.into()),
                Err(e) => {
                    error!("Failed to fetch comments for {}: {:#}", post.post_id, e);
                    Vec::new()
                }
            };

            let new_here = snapshot.observe(&post.post_id, comments, |c| c.comment_id.as_str());
            debug!("Post {}: {} new comments", post.post_id, new_here.len());
            fresh.extend(new_here);
        }

        let state = snapshot.into_state();
        if let Err(e) = self.state.save(&state) {
            error!("Failed to save comment state: {:#}", e);
        }
        self.previous = state;

        info!("Found {} new comments", fresh.len());
        Ok(fresh)
    }

    pub fn state_file(&self) -> &StateFile {
        &self.state
    }
}
