use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::storage::StateFile;
use crate::sync::SeenSet;

use super::client::MailSource;
use super::message::EmailMessage;
use super::parser::NotificationParser;
use super::types::NotificationRecord;

/// Reports LinkedIn notification emails that were not reported before.
pub struct EmailMonitor<S> {
    source: S,
    parser: NotificationParser,
    state: StateFile,
    seen: SeenSet,
}

impl<S: MailSource> EmailMonitor<S> {
    /// Loads the processed-notification ids from disk.
    pub fn new(source: S, config: &AppConfig) -> Self {
        let state = StateFile::new(&config.storage.processed_notifications_file);
        let seen: SeenSet = state.load();
        debug!("Loaded {} processed notification ids", seen.len());

        Self {
            source,
            parser: NotificationParser::new(),
            state,
            seen,
        }
    }

    pub fn state_file(&self) -> &StateFile {
        &self.state
    }

    /// Fetches the last `days` days of notification mail and returns only
    /// notifications not seen in earlier runs, then saves the seen ids.
    ///
    /// Transport failures are logged and yield no notifications; missing
    /// credentials are returned as an error. A failed save is logged and the
    /// notifications are still returned.
    pub async fn new_notifications(&mut self, days: u32) -> Result<Vec<NotificationRecord>> {
        info!("Fetching LinkedIn emails from the past {} days", days);

        let raw = match self.source.fetch_recent(days).await {
            Ok(raw) => raw,
            Err(e) if e.is_config() => return Err(e.into()),
            Err(e) => {
                error!("Failed to fetch emails: {:#}", e);
                Vec::new()
            }
        };

        let messages = raw.iter().filter_map(|bytes| {
            let message = EmailMessage::parse(bytes);
            if message.is_none() {
                warn!("Skipping email that could not be parsed ({} bytes)", bytes.len());
            }
            message
        });

        let parser = &self.parser;
        let fresh = self.seen.take_new(messages, EmailMessage::identity, |message| {
            let record = parser.parse(&message);
            if record.is_none() {
                debug!("Not a recognized notification: {:?}", message.subject);
            }
            record
        });

        if let Err(e) = self.state.save(&self.seen) {
            error!("Failed to save processed notifications: {:#}", e);
        }
        info!("Found {} new notifications", fresh.len());
        Ok(fresh)
    }
}

impl<S> EmailMonitor<S> {
    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::{EmailError, NotificationKind};
    use std::cell::Cell;

    struct FakeInbox {
        messages: Vec<String>,
        fail: bool,
        calls: Cell<usize>,
    }

    impl FakeInbox {
        fn with(messages: Vec<String>) -> Self {
            Self {
                messages,
                fail: false,
                calls: Cell::new(0),
            }
        }
    }

    impl MailSource for FakeInbox {
        async fn fetch_recent(&self, _days: u32) -> std::result::Result<Vec<Vec<u8>>, EmailError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(EmailError::ConnectionFailed("connection refused".to_string()));
            }
            Ok(self.messages.iter().map(|m| m.as_bytes().to_vec()).collect())
        }
    }

    fn email(id: &str, subject: &str) -> String {
        format!(
            "From: LinkedIn <noreply@linkedin.com>\r\n\
             Subject: {subject}\r\n\
             Message-ID: <{id}@linkedin.com>\r\n\
             Date: Tue, 13 Oct 2026 09:30:00 +0000\r\n\
             Content-Type: text/html; charset=utf-8\r\n\
             \r\n\
             <p>Looks great, congratulations on the launch!</p>\r\n"
        )
    }

    fn config_in(dir: &tempfile::TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.storage.processed_notifications_file = dir.path().join("processed.json");
        config
    }

    #[tokio::test]
    async fn test_second_run_reports_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let inbox = vec![
            email("a", "Jane commented on your post"),
            email("b", "Sam liked your post"),
        ];

        let mut monitor = EmailMonitor::new(FakeInbox::with(inbox.clone()), &config);
        let first = monitor.new_notifications(7).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].kind, NotificationKind::Comment);
        assert_eq!(first[1].kind, NotificationKind::Like);

        // Fresh monitor, same state file: nothing is new.
        let mut monitor = EmailMonitor::new(FakeInbox::with(inbox), &config);
        assert!(monitor.new_notifications(7).await.unwrap().is_empty());
        assert_eq!(monitor.seen().len(), 2);
    }

    #[tokio::test]
    async fn test_unrecognized_mail_is_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let mut monitor = EmailMonitor::new(
            FakeInbox::with(vec![email("digest", "Your weekly network update")]),
            &config,
        );
        assert!(monitor.new_notifications(7).await.unwrap().is_empty());
        assert!(monitor.seen().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_yields_empty_and_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let mut monitor =
            EmailMonitor::new(FakeInbox::with(vec![email("a", "Jane commented on your post")]), &config);
        monitor.new_notifications(7).await.unwrap();

        let mut failing = FakeInbox::with(Vec::new());
        failing.fail = true;
        let mut monitor = EmailMonitor::new(failing, &config);
        assert!(monitor.new_notifications(7).await.unwrap().is_empty());
        assert_eq!(monitor.seen().len(), 1);
        assert_eq!(monitor.source.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_missing_credentials_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let mut monitor = EmailMonitor::new(crate::email::ImapSource::new(&config.email), &config);

        let err = monitor.new_notifications(7).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EmailError>(),
            Some(EmailError::MissingCredentials)
        ));
        assert!(!config.storage.processed_notifications_file.exists());
    }

    #[tokio::test]
    async fn test_unwritable_state_still_returns_notifications() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.storage.processed_notifications_file = dir.path().to_path_buf();

        let mut monitor =
            EmailMonitor::new(FakeInbox::with(vec![email("a", "Jane commented on your post")]), &config);
        let fresh = monitor.new_notifications(7).await.unwrap();

        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].author, "Jane");
        assert!(dir.path().is_dir());
    }
}
