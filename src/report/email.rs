use crate::email::{NotificationKind, NotificationRecord};

use super::{banner, or_placeholder, rule};

/// Terminal report of new notifications, grouped by kind.
pub fn render_notifications(notifications: &[NotificationRecord]) -> String {
    let mut lines = banner("📧 LinkedIn Email Monitor Results");

    if notifications.is_empty() {
        lines.push("✅ No new LinkedIn notifications found in your email".to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "📊 Found {} new LinkedIn notifications",
        notifications.len()
    ));

    for kind in NotificationKind::all() {
        let group: Vec<_> = notifications.iter().filter(|n| n.kind == *kind).collect();
        if group.is_empty() {
            continue;
        }

        lines.push(String::new());
        lines.push(format!("{} ({}):", heading(*kind), group.len()));
        lines.push(rule());

        for n in group {
            let author = or_placeholder(&n.author, "Unknown");
            let date = or_placeholder(&n.date, "Unknown date");
            match kind {
                NotificationKind::Comment => {
                    lines.push(String::new());
                    lines.push(format!("👤 {}", author));
                    lines.push(format!("💭 {}", n.content));
                    lines.push(format!("📝 Post: {}", n.post_excerpt));
                    lines.push(format!("🕒 {}", date));
                }
                NotificationKind::Like => {
                    lines.push(format!("👤 {} liked your post", author));
                    lines.push(format!("🕒 {}", date));
                }
                NotificationKind::Share => {
                    lines.push(format!("👤 {} shared your post", author));
                    lines.push(format!("🕒 {}", date));
                }
            }
        }
    }

    lines.join("\n")
}

fn heading(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Comment => "💬 NEW COMMENTS",
        NotificationKind::Like => "❤️ NEW LIKES",
        NotificationKind::Share => "🔄 NEW SHARES",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: NotificationKind, author: &str) -> NotificationRecord {
        NotificationRecord {
            subject: String::new(),
            sender: "noreply@linkedin.com".to_string(),
            date: "2026-10-13T09:30:00Z".to_string(),
            author: author.to_string(),
            content: "Nice post".to_string(),
            post_excerpt: "Post excerpt not available".to_string(),
            kind,
        }
    }

    #[test]
    fn test_empty_report() {
        let out = render_notifications(&[]);
        assert!(out.contains("No new LinkedIn notifications"));
        assert!(!out.contains("NEW COMMENTS"));
    }

    #[test]
    fn test_groups_in_kind_order() {
        let out = render_notifications(&[
            record(NotificationKind::Share, "Ana"),
            record(NotificationKind::Comment, "Jane"),
            record(NotificationKind::Like, "Sam"),
        ]);

        let comments = out.find("NEW COMMENTS (1)").unwrap();
        let likes = out.find("NEW LIKES (1)").unwrap();
        let shares = out.find("NEW SHARES (1)").unwrap();
        assert!(comments < likes && likes < shares);
        assert!(out.contains("👤 Sam liked your post"));
        assert!(out.contains("📊 Found 3 new LinkedIn notifications"));
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let mut n = record(NotificationKind::Like, "");
        n.date = String::new();
        let out = render_notifications(&[n]);
        assert!(out.contains("👤 Unknown liked your post"));
        assert!(out.contains("🕒 Unknown date"));
    }
}
