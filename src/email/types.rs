use serde::Serialize;
use std::fmt;

/// The engagement a notification email reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Comment,
    Like,
    Share,
}

impl NotificationKind {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Comment => "comment",
            NotificationKind::Like => "like",
            NotificationKind::Share => "share",
        }
    }

    /// Report order.
    pub fn all() -> &'static [NotificationKind] {
        &[
            NotificationKind::Comment,
            NotificationKind::Like,
            NotificationKind::Share,
        ]
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A LinkedIn notification recovered from one email.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationRecord {
    pub subject: String,
    pub sender: String,
    pub date: String,
    /// Who acted; `Unknown` when the subject didn't say.
    pub author: String,
    pub content: String,
    pub post_excerpt: String,
    pub kind: NotificationKind,
}
