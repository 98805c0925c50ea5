//! Decoding of raw RFC 822 messages into the fields the parser reads.

use mail_parser::{HeaderName, MessageParser, PartType};

/// Header and body fields of one fetched email.
#[derive(Debug, Clone, Default)]
pub struct EmailMessage {
    /// Header text as received, angle brackets included.
    pub message_id: Option<String>,
    /// Header text as received, not normalized.
    pub date: Option<String>,
    pub subject: String,
    pub sender: String,
    /// First text/html or text/plain part, in MIME walk order.
    pub body: Option<String>,
}

impl EmailMessage {
    /// Returns `None` if the bytes are not a parseable message.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        let message = MessageParser::default().parse(raw)?;

        let body = message.parts.iter().find_map(|part| match &part.body {
            PartType::Html(text) | PartType::Text(text) => Some(text.to_string()),
            _ => None,
        });

        Some(Self {
            message_id: header_text(message.header_raw(HeaderName::MessageId)),
            date: header_text(message.header_raw(HeaderName::Date)),
            subject: message.subject().unwrap_or_default().to_string(),
            sender: message
                .from()
                .and_then(|addr| addr.first().map(format_address))
                .unwrap_or_default(),
            body,
        })
    }

    /// De-duplication key: Message-ID and Date joined by `_`.
    pub fn identity(&self) -> String {
        format!(
            "{}_{}",
            self.message_id.as_deref().unwrap_or("None"),
            self.date.as_deref().unwrap_or("None")
        )
    }
}

fn header_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Formats as "Name <email@example.com>", or just the address without a name.
fn format_address(addr: &mail_parser::Addr) -> String {
    if let Some(name) = addr.name() {
        format!("{} <{}>", name, addr.address().unwrap_or_default())
    } else {
        addr.address().unwrap_or_default().to_string()
    }
}
