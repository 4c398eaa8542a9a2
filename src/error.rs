use axum::http::StatusCode;
use serde::Serialize;

use crate::api::response::{self, Envelope};

/// Fixed message returned when Polly answers without an audio payload.
pub const EMPTY_AUDIO_MESSAGE: &str = "No audio stream from Polly.";

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{}", EMPTY_AUDIO_MESSAGE)]
    EmptyAudio,

    #[error("AWS error: {0}")]
    Provider(String),

    #[error("Server error: {0}")]
    Internal(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Not found")]
    NotFound,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::EmptyAudio => StatusCode::BAD_GATEWAY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Provider(_) | AppError::Internal(_) | AppError::JsonError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> ErrorResponse {
        let (error, detail) = match self {
            AppError::BadRequest(msg) => (msg.clone(), None),
            AppError::EmptyAudio => (EMPTY_AUDIO_MESSAGE.to_string(), None),
            AppError::NotFound => ("Not found".to_string(), None),
            AppError::Provider(msg) => ("AWS error".to_string(), Some(msg.clone())),
            AppError::Internal(msg) => ("Server error".to_string(), Some(msg.clone())),
            AppError::JsonError(e) => ("Server error".to_string(), Some(e.to_string())),
        };
        ErrorResponse { error, detail }
    }

    /// Render the error through the shared response formatter.
    pub fn to_envelope(&self) -> Envelope {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Request failed: {} - {}", status.as_u16(), self);
        } else if status != StatusCode::NOT_FOUND {
            tracing::warn!("Request rejected: {} - {}", status.as_u16(), self);
        }

        response::format(status, &self.body())
    }
}
