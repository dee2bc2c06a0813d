//! Remote service error handling
//!
//! Typed errors for remote calls. Callers mostly care about two questions:
//! is the item gone (`is_not_found`), and was the failure transient
//! (`is_retryable`).

use thiserror::Error;

use super::retry::RETRYABLE_STATUS_CODES;

/// Errors that can occur when talking to the remote service
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Non-success status that retrying won't fix
    #[error("Request failed: {status}")]
    Status { status: u16 },

    /// The item doesn't exist (any more)
    #[error("Request failed: 404 (item not found)")]
    NotFound,

    /// Every attempt hit a retryable status
    #[error("Max retries exceeded ({attempts} attempts, last status {last_status})")]
    RetriesExhausted { attempts: u32, last_status: u16 },

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body wasn't what we expected
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Classify a failing status code
    pub fn from_status(status: u16) -> Self {
        if status == 404 {
            RemoteError::NotFound
        } else {
            RemoteError::Status { status }
        }
    }

    /// Check if this error means the remote item no longer exists
    ///
    /// Transport errors count when their message reports a 404, since some
    /// layers surface a missing item as an error rather than a status.
    pub fn is_not_found(&self) -> bool {
        match self {
            RemoteError::NotFound => true,
            RemoteError::Status { status } => *status == 404,
            RemoteError::Transport(message) => mentions_not_found(message),
            _ => false,
        }
    }

    /// Check if the failure was transient
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteError::Status { status } => RETRYABLE_STATUS_CODES.contains(status),
            _ => false,
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status } => Some(*status),
            RemoteError::NotFound => Some(404),
            RemoteError::RetriesExhausted { last_status, .. } => Some(*last_status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            return RemoteError::from_status(status.as_u16());
        }
        // The URL carries the item id; keep it out of the message so an id
        // can never read as a status
        let error = error.without_url();
        if error.is_decode() {
            return RemoteError::Decode(error.to_string());
        }
        RemoteError::Transport(error.to_string())
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(error: serde_json::Error) -> Self {
        RemoteError::Decode(error.to_string())
    }
}

fn mentions_not_found(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("404") || lower.contains("not found")
}

/// Result type for remote operations
pub type RemoteResult<T> = Result<T, RemoteError>;
