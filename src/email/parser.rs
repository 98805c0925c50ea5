//! Classification of LinkedIn notification emails.

use regex::Regex;
use scraper::{Html, Node, Selector};
use tracing::debug;

use super::message::EmailMessage;
use super::types::{NotificationKind, NotificationRecord};

pub const UNKNOWN_AUTHOR: &str = "Unknown";
const NO_COMMENT_CONTENT: &str = "Comment content not available";
const NO_POST_EXCERPT: &str = "Post excerpt not available";

const CONTENT_MIN_CHARS: usize = 20;
const CONTENT_MAX_CHARS: usize = 200;
const EXCERPT_MAX_CHARS: usize = 100;

/// Turns notification emails into [`NotificationRecord`]s.
///
/// Parsing is best-effort: unrecognized mail yields `None`, and missing
/// details fall back to placeholder text.
pub struct NotificationParser {
    comment_author: Regex,
    like_author: Regex,
    share_author: Regex,
    post_excerpt: Regex,
    content_selector: Selector,
}

impl NotificationParser {
    pub fn new() -> Self {
        Self {
            comment_author: compile(r"(.+?) commented on"),
            like_author: compile(r"(.+?) (liked|reacted to)"),
            share_author: compile(r"(.+?) shared"),
            post_excerpt: compile(r#"(?i)your post[:\s]*"?([^"]+)"?"#),
            content_selector: Selector::parse("p, div, span").expect("Invalid content selector"),
        }
    }

    /// Classifies with comment checks first, then like, then share.
    pub fn classify(subject: &str, body: &str) -> Option<NotificationKind> {
        if subject.contains("commented on your post") || body.contains("commented on your") {
            Some(NotificationKind::Comment)
        } else if subject.contains("liked your post") {
            Some(NotificationKind::Like)
        } else if subject.contains("shared your post") {
            Some(NotificationKind::Share)
        } else {
            None
        }
    }

    pub fn parse(&self, message: &EmailMessage) -> Option<NotificationRecord> {
        let Some(body) = message.body.as_deref().filter(|b| !b.is_empty()) else {
            debug!("Email {:?} has no text body", message.subject);
            return None;
        };

        let kind = Self::classify(&message.subject, body)?;
        let author = self.extract_author(kind, &message.subject);
        debug!("Parsed {} notification from {}", kind, author);

        let (content, post_excerpt) = match kind {
            NotificationKind::Comment => (
                self.extract_comment_content(body),
                self.extract_post_excerpt(&message.subject, body),
            ),
            NotificationKind::Like => ("Liked your post".to_string(), NO_POST_EXCERPT.to_string()),
            NotificationKind::Share => {
                ("Shared your post".to_string(), NO_POST_EXCERPT.to_string())
            }
        };

        Some(NotificationRecord {
            subject: message.subject.clone(),
            sender: message.sender.clone(),
            date: message.date.clone().unwrap_or_default(),
            author,
            content,
            post_excerpt,
            kind,
        })
    }

    /// First match of the kind's pattern against the subject, or `Unknown`.
    pub fn extract_author(&self, kind: NotificationKind, subject: &str) -> String {
        let pattern = match kind {
            NotificationKind::Comment => &self.comment_author,
            NotificationKind::Like => &self.like_author,
            NotificationKind::Share => &self.share_author,
        };

        pattern
            .captures(subject)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
    }

    /// Text of the first leaf `p`/`div`/`span` that reads like a comment.
    fn extract_comment_content(&self, body: &str) -> String {
        let document = Html::parse_document(body);

        for element in document.select(&self.content_selector) {
            let has_child_elements = element
                .children()
                .any(|child| matches!(child.value(), Node::Element(_)));
            if has_child_elements {
                continue;
            }

            let text = element.text().collect::<String>();
            let text = text.trim();
            if text.chars().count() <= CONTENT_MIN_CHARS {
                continue;
            }

            let lower = text.to_lowercase();
            if lower.contains("unsubscribe") || lower.contains("linkedin") {
                continue;
            }

            return truncate(text, CONTENT_MAX_CHARS);
        }

        NO_COMMENT_CONTENT.to_string()
    }

    fn extract_post_excerpt(&self, subject: &str, body: &str) -> String {
        if !subject.contains("your post") {
            return NO_POST_EXCERPT.to_string();
        }

        self.post_excerpt
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| format!("{}...", m.as_str().chars().take(EXCERPT_MAX_CHARS).collect::<String>()))
            .unwrap_or_else(|| NO_POST_EXCERPT.to_string())
    }
}

impl Default for NotificationParser {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid notification pattern")
}

/// Cuts to `max` characters, appending `...` when anything was dropped.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(subject: &str, body: &str) -> EmailMessage {
        EmailMessage {
            message_id: Some("id@linkedin.com".to_string()),
            date: Some("2026-10-13T09:30:00Z".to_string()),
            subject: subject.to_string(),
            sender: "noreply@linkedin.com".to_string(),
            body: Some(body.to_string()),
        }
    }

    #[test]
    fn test_comment_wins_over_like() {
        let kind = NotificationParser::classify(
            "Jane liked your post",
            "Jane commented on your update as well",
        );
        assert_eq!(kind, Some(NotificationKind::Comment));

        let kind = NotificationParser::classify(
            "Jane commented on your post and liked your post",
            "",
        );
        assert_eq!(kind, Some(NotificationKind::Comment));
    }

    #[test]
    fn test_classify_like_and_share() {
        assert_eq!(
            NotificationParser::classify("Sam liked your post", "body"),
            Some(NotificationKind::Like)
        );
        assert_eq!(
            NotificationParser::classify("Sam shared your post", "body"),
            Some(NotificationKind::Share)
        );
        assert_eq!(
            NotificationParser::classify("You appeared in 5 searches", "body"),
            None
        );
    }

    #[test]
    fn test_extract_author() {
        let parser = NotificationParser::new();
        assert_eq!(
            parser.extract_author(NotificationKind::Comment, "Jane Doe commented on your post"),
            "Jane Doe"
        );
        assert_eq!(
            parser.extract_author(NotificationKind::Like, "Sam Lee reacted to your post"),
            "Sam Lee"
        );
        assert_eq!(
            parser.extract_author(NotificationKind::Share, "Ana shared your post"),
            "Ana"
        );
    }

    #[test]
    fn test_author_falls_back_to_unknown() {
        let parser = NotificationParser::new();
        assert_eq!(
            parser.extract_author(NotificationKind::Comment, "New activity on your post"),
            UNKNOWN_AUTHOR
        );

        // Classified as a comment through the body, but the subject names nobody.
        let record = parser
            .parse(&message("New activity", "Someone commented on your post"))
            .unwrap();
        assert_eq!(record.kind, NotificationKind::Comment);
        assert_eq!(record.author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_comment_content_and_excerpt() {
        let parser = NotificationParser::new();
        let body = r#"<html><body>
            <div><p>View on LinkedIn to reply to this comment</p></div>
            <span>short</span>
            <p>Great write-up, thanks for sharing the benchmarks!</p>
            <p>your post: "Rust in production"</p>
        </body></html>"#;

        let record = parser
            .parse(&message("Jane Doe commented on your post", body))
            .unwrap();
        assert_eq!(record.author, "Jane Doe");
        assert_eq!(record.content, "Great write-up, thanks for sharing the benchmarks!");
        assert_eq!(record.post_excerpt, "Rust in production...");
    }

    #[test]
    fn test_comment_placeholders() {
        let parser = NotificationParser::new();
        let record = parser
            .parse(&message("Jane commented on a post you follow", "<p>hi</p> commented on your"))
            .unwrap();
        assert_eq!(record.content, NO_COMMENT_CONTENT);
        assert_eq!(record.post_excerpt, NO_POST_EXCERPT);
    }

    #[test]
    fn test_like_record() {
        let parser = NotificationParser::new();
        let record = parser.parse(&message("Sam liked your post", "<p>x</p>")).unwrap();
        assert_eq!(record.kind, NotificationKind::Like);
        assert_eq!(record.author, "Sam");
        assert_eq!(record.content, "Liked your post");
    }

    #[test]
    fn test_unrecognized_and_empty_body() {
        let parser = NotificationParser::new();
        assert!(parser.parse(&message("Weekly digest", "<p>news</p>")).is_none());

        let mut empty = message("Sam liked your post", "");
        assert!(parser.parse(&empty).is_none());
        empty.body = None;
        assert!(parser.parse(&empty).is_none());
    }

    #[test]
    fn test_long_content_is_truncated() {
        let long = "a".repeat(250);
        assert_eq!(truncate(&long, 200).chars().count(), 203);
        assert_eq!(truncate("short", 200), "short");
    }
}
