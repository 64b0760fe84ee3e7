//! The one failure kind of a fetch cycle

use thiserror::Error;

use crate::constants::FALLBACK_ERROR_MESSAGE;

/// Anything that went wrong between issuing the GET and holding decoded records.
///
/// Transport errors, non-success statuses and undecodable bodies all collapse
/// into this single kind; only the message survives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{0}")]
    FetchFailure(String),
}

impl FetchError {
    /// Build a failure from any message, substituting the fallback for blank text
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            FetchError::FetchFailure(FALLBACK_ERROR_MESSAGE.to_string())
        } else {
            FetchError::FetchFailure(message)
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FetchError::FetchFailure(message) => message,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        let msg = if e.is_timeout() {
            format!("Request timed out: {}", e)
        } else if e.is_connect() {
            format!("Connection failed: {}", e)
        } else if e.is_decode() {
            format!("Invalid response body: {}", e)
        } else {
            e.to_string()
        };
        FetchError::new(msg)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::new(format!("Invalid JSON: {}", e))
    }
}
