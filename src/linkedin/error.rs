use reqwest::StatusCode;
use thiserror::Error;

/// Errors from LinkedIn API calls.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No LinkedIn access token available: set LINKEDIN_ACCESS_TOKEN")]
    MissingToken,

    #[error("LinkedIn API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LinkedIn API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode LinkedIn API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("LinkedIn API still rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },
}

impl ApiError {
    /// Configuration problems need user action; everything else is transient.
    pub fn is_config(&self) -> bool {
        matches!(self, ApiError::MissingToken)
    }
}
