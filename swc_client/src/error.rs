//! Errors returned by the client.

use swc_api::error::ErrorBody;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API returned {status} ({code}): {message}")]
    Status {
        status: u16,
        code: String,
        message: String,
    },
}

impl ClientError {
    /// Build a `Status` error, reading the API's error envelope when the body has one.
    pub fn from_status(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(envelope) => ClientError::Status {
                status,
                code: envelope.error.code,
                message: envelope.error.message,
            },
            Err(_) => ClientError::Status {
                status,
                code: "unknown".into(),
                message: body.to_string(),
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
