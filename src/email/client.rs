//! IMAP access to the notification inbox.

use std::future::Future;

use async_imap::Session;
use async_native_tls::TlsConnector;
use chrono::{Duration, Local, NaiveDate};
use futures_util::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::config::EmailConfig;

use super::error::{EmailError, Result};

type AsyncTcpStream = async_io::Async<std::net::TcpStream>;
type TlsStream = async_native_tls::TlsStream<AsyncTcpStream>;

/// Somewhere notification emails can be fetched from.
pub trait MailSource {
    /// Raw RFC 822 messages from the notification sender received in the
    /// last `days` days.
    fn fetch_recent(&self, days: u32) -> impl Future<Output = Result<Vec<Vec<u8>>>>;
}

/// Reads LinkedIn mail over IMAP-over-TLS. Every fetch opens its own session.
pub struct ImapSource {
    host: String,
    port: u16,
    folder: String,
    sender: String,
    username: Option<String>,
    password: Option<SecretString>,
}

impl ImapSource {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            folder: config.folder.clone(),
            sender: config.sender.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    async fn connect(&self) -> Result<Session<TlsStream>> {
        let (Some(username), Some(password)) = (&self.username, &self.password) else {
            return Err(EmailError::MissingCredentials);
        };

        let addr = format!("{}:{}", self.host, self.port);
        info!("Connecting to IMAP server at {}", addr);

        let std_stream = std::net::TcpStream::connect(&addr)
            .map_err(|e| EmailError::ConnectionFailed(e.to_string()))?;
        std_stream
            .set_nonblocking(true)
            .map_err(|e| EmailError::ConnectionFailed(e.to_string()))?;
        let tcp_stream = async_io::Async::new(std_stream)
            .map_err(|e| EmailError::ConnectionFailed(e.to_string()))?;

        let tls_stream = TlsConnector::new().connect(&self.host, tcp_stream).await?;

        let client = async_imap::Client::new(tls_stream);
        let session = client
            .login(username, password.expose_secret())
            .await
            .map_err(|(e, _)| EmailError::AuthenticationFailed(e.to_string()))?;

        info!("Connected to email server");
        Ok(session)
    }

    async fn fetch_matching(&self, session: &mut Session<TlsStream>, since: NaiveDate) -> Result<Vec<Vec<u8>>> {
        // EXAMINE keeps the folder read-only.
        session
            .examine(&self.folder)
            .await
            .map_err(|e| EmailError::ProtocolError(e.to_string()))?;

        let query = search_query(&self.sender, since);
        debug!("Searching with query: {}", query);

        let mut uids: Vec<u32> = session
            .uid_search(&query)
            .await
            .map_err(|e| EmailError::ProtocolError(e.to_string()))?
            .into_iter()
            .collect();
        uids.sort_unstable();

        if uids.is_empty() {
            return Ok(Vec::new());
        }

        let uid_set = uids
            .iter()
            .map(|u| u.to_string())
            .collect::<Vec<_>>()
            .join(",");

        // BODY.PEEK[] leaves the \Seen flag alone.
        let mut messages = session
            .uid_fetch(&uid_set, "(UID BODY.PEEK[])")
            .await
            .map_err(|e| EmailError::ProtocolError(e.to_string()))?;

        let mut raw = Vec::with_capacity(uids.len());
        while let Some(message) = messages.next().await {
            match message {
                Ok(fetch) => match fetch.body() {
                    Some(body) => raw.push(body.to_vec()),
                    None => warn!("Message {:?} has no body", fetch.uid),
                },
                Err(e) => warn!("Error fetching message: {}", e),
            }
        }

        Ok(raw)
    }
}

impl MailSource for ImapSource {
    async fn fetch_recent(&self, days: u32) -> Result<Vec<Vec<u8>>> {
        let since = (Local::now() - Duration::days(i64::from(days))).date_naive();
        let mut session = self.connect().await?;

        let fetched = self.fetch_matching(&mut session, since).await;

        if let Err(e) = session.logout().await {
            warn!("IMAP logout failed: {}", e);
        }

        let raw = fetched?;
        info!("Fetched {} emails from {}", raw.len(), self.sender);
        Ok(raw)
    }
}

/// IMAP SEARCH criteria for mail from `sender` on or after `since`.
pub fn search_query(sender: &str, since: NaiveDate) -> String {
    format!("FROM \"{}\" SINCE {}", sender, since.format("%d-%b-%Y"))
}
