//! Failure taxonomy for the identity client and its display-string normalization.

use std::any::Any;

use reqwest::StatusCode;
use shared::error::ValidationError;
use thiserror::Error;

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{message}")]
    Http { status: StatusCode, message: String },
    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{context}: invalid response body: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid client configuration: {0}")]
    Config(String),
    #[error("request cancelled")]
    Cancelled,
    #[error("{}", .0.as_deref().unwrap_or(UNEXPECTED_ERROR_MESSAGE))]
    Unknown(Option<String>),
}

impl ClientError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// HTTP status of the failed response, when the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// Display string for a client failure.
pub fn error_message(error: &ClientError) -> String {
    match error {
        ClientError::Unknown(Some(message)) if message.trim().is_empty() => {
            UNEXPECTED_ERROR_MESSAGE.to_string()
        }
        other => other.to_string(),
    }
}

/// Display string for a value of unknown shape, such as a panic payload.
pub fn message_from_payload(payload: &(dyn Any + Send)) -> String {
    if let Some(error) = payload.downcast_ref::<ClientError>() {
        return error_message(error);
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        return (*message).to_string();
    }
    if let Some(error) = payload.downcast_ref::<anyhow::Error>() {
        return error.to_string();
    }
    UNEXPECTED_ERROR_MESSAGE.to_string()
}
