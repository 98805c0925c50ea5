use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a port number, got {value:?}")]
    InvalidPort { key: &'static str, value: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub email: EmailConfig,
    pub linkedin: LinkedInConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    pub folder: String,
    /// Only mail from this address is fetched.
    pub sender: String,
    pub lookback_days: u32,
    // Loaded from env
    #[serde(skip)]
    pub username: Option<String>,
    #[serde(skip)]
    pub password: Option<SecretString>,
    /// Raw `EMAIL_PORT` value that failed to parse.
    #[serde(skip)]
    pub invalid_port: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            host: "imap.gmail.com".to_string(),
            port: 993,
            folder: "INBOX".to_string(),
            sender: "noreply@linkedin.com".to_string(),
            lookback_days: 7,
            username: None,
            password: None,
            invalid_port: None,
        }
    }
}

impl EmailConfig {
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Fails if the environment supplied a port that isn't a number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.invalid_port {
            Some(value) => Err(ConfigError::InvalidPort {
                key: "EMAIL_PORT",
                value: value.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinkedInConfig {
    pub base_url: String,
    pub lookback_days: u32,
    pub rate_limit_delay_secs: u64,
    /// Retries allowed per request after a 429 before giving up.
    pub max_rate_limit_retries: u32,
    pub posts_page_size: u32,
    pub comments_page_size: u32,
    /// Author URN for the posts query; derived from the profile when unset.
    pub person_urn: Option<String>,
    // Loaded from env
    #[serde(skip)]
    pub access_token: Option<SecretString>,
    #[serde(skip)]
    pub client_id: Option<String>,
    #[serde(skip)]
    pub client_secret: Option<SecretString>,
}

impl Default for LinkedInConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.linkedin.com/v2".to_string(),
            lookback_days: 7,
            rate_limit_delay_secs: 60,
            max_rate_limit_retries: 3,
            posts_page_size: 50,
            comments_page_size: 100,
            person_urn: None,
            access_token: None,
            client_id: None,
            client_secret: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub processed_notifications_file: PathBuf,
    pub comments_state_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            processed_notifications_file: PathBuf::from("processed_notifications.json"),
            comments_state_file: PathBuf::from("linkedin_comments_state.json"),
        }
    }
}

impl AppConfig {
    /// Loads `.env`, then the optional `config.toml`, then overlays the
    /// process environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::from_file(Path::new(CONFIG_FILE))?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let config_text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&config_text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// `lookup` is `std::env::var` in production; tests pass a map. A bad
    /// `EMAIL_PORT` is kept on the email config for `validate`.
    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = lookup("EMAIL_HOST") {
            self.email.host = host;
        }
        if let Some(port) = lookup("EMAIL_PORT") {
            match port.trim().parse() {
                Ok(port) => self.email.port = port,
                Err(_) => self.email.invalid_port = Some(port),
            }
        }
        if let Some(username) = lookup("EMAIL_USERNAME") {
            self.email.username = Some(username);
        }
        if let Some(password) = lookup("EMAIL_PASSWORD") {
            self.email.password = Some(SecretString::from(password));
        }

        if let Some(token) = lookup("LINKEDIN_ACCESS_TOKEN") {
            self.linkedin.access_token = Some(SecretString::from(token.trim()));
        }
        if let Some(client_id) = lookup("LINKEDIN_CLIENT_ID") {
            self.linkedin.client_id = Some(client_id);
        }
        if let Some(secret) = lookup("LINKEDIN_CLIENT_SECRET") {
            self.linkedin.client_secret = Some(SecretString::from(secret));
        }
        if let Some(urn) = lookup("LINKEDIN_PERSON_URN") {
            self.linkedin.person_urn = Some(urn);
        }
    }
}
