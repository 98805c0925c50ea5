use chrono::{DateTime, Utc};

use crate::email::parser::truncate;
use crate::linkedin::{Comment, Post};

use super::{banner, or_placeholder, rule};

/// Terminal report of new comments grouped by post, followed by a summary
/// of every post in the window.
pub fn render_comments(posts: &[Post], new_comments: &[Comment], days: u32) -> String {
    let mut lines = banner("🔍 LinkedIn Post Monitor Results");

    if posts.is_empty() {
        lines.push(format!("❌ No posts found from the past {} days", days));
        lines.push(String::new());
        lines.push("Possible reasons:".to_string());
        lines.push(format!("- No posts were made in the past {} days", days));
        lines.push("- API access limitations".to_string());
        lines.push("- Authentication issues".to_string());
        return lines.join("\n");
    }

    lines.push(format!("📊 Found {} posts from the past {} days", posts.len(), days));
    lines.push(format!("💬 Found {} new comments", new_comments.len()));

    if new_comments.is_empty() {
        lines.push(String::new());
        lines.push("✅ No new comments found on your recent posts".to_string());
    } else {
        lines.push(String::new());
        lines.push("🆕 NEW COMMENTS:".to_string());
        lines.push(rule());

        for (post_id, comments) in group_by_post(new_comments) {
            let post = posts.iter().find(|p| p.post_id == post_id);

            lines.push(String::new());
            match post {
                Some(post) => {
                    lines.push(format!("📝 Post: {}", excerpt(&post.content, 100)));
                    lines.push(format!("   Created: {}", timestamp(post.created_at)));
                }
                None => {
                    lines.push(format!("📝 Post ID: {}", post_id));
                    lines.push("   Created: Unknown".to_string());
                }
            }

            for comment in comments {
                lines.push(String::new());
                lines.push("   💬 New Comment:".to_string());
                lines.push(format!(
                    "      👤 Author: {}",
                    or_placeholder(&comment.author_name, "Unknown")
                ));
                lines.push(format!(
                    "      💭 Content: {}",
                    or_placeholder(&comment.content, "(no content)")
                ));
                lines.push(format!("      🕒 Time: {}", timestamp(comment.created_at)));
            }
        }
    }

    lines.push(String::new());
    lines.push("📈 POST SUMMARY:".to_string());
    lines.push(rule());
    for post in posts {
        lines.push(String::new());
        lines.push(format!("📝 {}", excerpt(&post.content, 80)));
        lines.push(format!(
            "   💬 {} comments | ❤️ {} likes | 🔄 {} shares",
            post.comments_count, post.likes_count, post.shares_count
        ));
        lines.push(format!("   🕒 {}", timestamp(post.created_at)));
    }

    lines.join("\n")
}

/// Comments grouped by post id, in order of first appearance.
fn group_by_post(comments: &[Comment]) -> Vec<(&str, Vec<&Comment>)> {
    let mut groups: Vec<(&str, Vec<&Comment>)> = Vec::new();
    for comment in comments {
        match groups.iter_mut().find(|(id, _)| *id == comment.post_id) {
            Some((_, group)) => group.push(comment),
            None => groups.push((comment.post_id.as_str(), vec![comment])),
        }
    }
    groups
}

fn excerpt(content: &str, max: usize) -> String {
    if content.trim().is_empty() {
        "(no content)".to_string()
    } else {
        truncate(content, max)
    }
}

fn timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
