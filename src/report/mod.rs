//! Plain-text terminal reports and setup guides.

pub mod email;
pub mod guide;
pub mod linkedin;

pub use email::render_notifications;
pub use guide::{alternative_approaches, api_setup_guide, email_setup_guide};
pub use linkedin::render_comments;

fn banner(title: &str) -> Vec<String> {
    let line = "=".repeat(60);
    vec![String::new(), line.clone(), title.to_string(), line, String::new()]
}

fn rule() -> String {
    "-".repeat(40)
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}
