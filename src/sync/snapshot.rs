use std::collections::{BTreeMap, HashSet};

/// Comment ids seen per post, as persisted between runs.
pub type CommentState = BTreeMap<String, Vec<String>>;

/// Diffs this run's comments against the previous run, post by post.
///
/// Each observed post's entry is replaced wholesale by the ids seen now.
/// Posts that were not observed are dropped from the next state. A comment
/// that disappears and later comes back is reported as new again.
#[derive(Debug, Default)]
pub struct CommentSnapshot {
    previous: CommentState,
    current: CommentState,
}

impl CommentSnapshot {
    pub fn new(previous: CommentState) -> Self {
        Self {
            previous,
            current: CommentState::new(),
        }
    }

    /// Records `items` as the full set of comments on `post_id` and returns
    /// those whose id was absent from the previous run's entry.
    pub fn observe<T>(
        &mut self,
        post_id: &str,
        items: Vec<T>,
        comment_id: impl Fn(&T) -> &str,
    ) -> Vec<T> {
        let known: HashSet<&str> = self
            .previous
            .get(post_id)
            .map(|ids| ids.iter().map(String::as_str).collect())
            .unwrap_or_default();

        let ids = items.iter().map(|item| comment_id(item).to_string()).collect();
        self.current.insert(post_id.to_string(), ids);

        items
            .into_iter()
            .filter(|item| !known.contains(comment_id(item)))
            .collect()
    }

    /// The state to persist for the next run.
    pub fn into_state(self) -> CommentState {
        self.current
    }
}
