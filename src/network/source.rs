//! User sources - where the directory comes from
//!
//! `HttpUserSource` is the reqwest-backed adapter used by the binary. Tests
//! plug their own `UserSource` into the network actor instead.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;

use crate::config::Config;
use crate::constants;
use crate::models::UserRecord;
use crate::network::error::FetchError;

/// Something that can produce the full list of users in one call
#[async_trait]
pub trait UserSource: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError>;

    /// Human readable origin, used in logs and the header
    fn describe(&self) -> String;
}

/// Fetches users with a single GET against one endpoint
pub struct HttpUserSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpUserSource {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        HttpUserSource {
            client: create_client(timeout),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.endpoint.clone(), config.request_timeout())
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let msg = match status.canonical_reason() {
                Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
                None => format!("HTTP {}", status.as_u16()),
            };
            return Err(FetchError::new(msg));
        }

        let body = resp.bytes().await?;
        decode_users(&body)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Decode a response body into records, keeping the payload's order
pub fn decode_users(body: &[u8]) -> Result<Vec<UserRecord>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

/// Create an HTTP client; `None` means requests never time out
fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder().user_agent(constants::USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to default HTTP client");
        reqwest::Client::new()
    })
}
