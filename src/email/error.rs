//! Email monitor error types.

use thiserror::Error;

/// Errors that can occur while reading the notification inbox.
#[derive(Error, Debug)]
pub enum EmailError {
    /// Username or password is not configured.
    #[error("Email credentials not found: set EMAIL_USERNAME and EMAIL_PASSWORD")]
    MissingCredentials,

    /// Failed to connect to the IMAP server.
    #[error("IMAP connection failed: {0}")]
    ConnectionFailed(String),

    /// TLS/SSL error during connection.
    #[error("TLS error: {0}")]
    TlsError(String),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// IMAP protocol error.
    #[error("IMAP protocol error: {0}")]
    ProtocolError(String),
}

impl EmailError {
    /// Configuration problems need user action; everything else is transient.
    pub fn is_config(&self) -> bool {
        matches!(self, EmailError::MissingCredentials)
    }
}

impl From<async_native_tls::Error> for EmailError {
    fn from(err: async_native_tls::Error) -> Self {
        EmailError::TlsError(err.to_string())
    }
}

/// Result type for email operations.
pub type Result<T> = std::result::Result<T, EmailError>;
