use std::future::Future;

use reqwest::{Client, StatusCode};

use super::error::ApiError;

/// Status and body of one HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Sends authenticated GET requests.
pub trait ApiTransport {
    fn get(
        &self,
        url: &str,
        token: &str,
        query: &[(&str, String)],
    ) -> impl Future<Output = Result<RawResponse, ApiError>>;
}

/// reqwest-backed transport carrying the Rest.li headers the v2 API expects.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiTransport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        token: &str,
        query: &[(&str, String)],
    ) -> Result<RawResponse, ApiError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .header("Content-Type", "application/json")
            .header("X-Restli-Protocol-Version", "2.0.0")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
