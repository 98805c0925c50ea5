//! Monitoring LinkedIn notification emails in an IMAP inbox.

pub mod client;
pub mod error;
pub mod message;
pub mod monitor;
pub mod parser;
pub mod types;

pub use client::{ImapSource, MailSource};
pub use error::EmailError;
pub use message::EmailMessage;
pub use monitor::EmailMonitor;
pub use parser::NotificationParser;
pub use types::{NotificationKind, NotificationRecord};
