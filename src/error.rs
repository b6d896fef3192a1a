// src/error.rs

use std::fmt;

use crate::config::GENERIC_ERROR_MESSAGE;

/// Crate-wide error for everything that talks to the content service.
/// Domain state machines wrap it in their own small enums.
#[derive(Debug)]
pub enum AppError {
    // Bad or missing configuration value
    Config(String),

    // Connection refused, timeout, TLS, ...
    Network(String),

    // Non-2xx response. `detail` is the service's own message, if it sent one.
    Service { status: u16, detail: Option<String> },

    // 2xx response whose body did not match the contract
    Decode(String),

    // Request rejected locally before any call was made
    Validation(String),

    // Local filesystem failure (downloads)
    Io(String),
}

impl AppError {
    /// Text suitable for showing to the learner.
    ///
    /// * Service errors use the `detail` field the service sent, if any.
    /// * Local validation messages are shown as-is.
    /// * Everything else collapses to a generic message.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Service {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            AppError::Validation(msg) => msg.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Builds a `Service` error from a failed response body.
    /// FastAPI-style bodies look like `{"detail": "..."}`; anything else yields no detail.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_owned));

        AppError::Service { status, detail }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "configuration error: {}", msg),
            AppError::Network(msg) => write!(f, "network error: {}", msg),
            AppError::Service { status, detail } => match detail {
                Some(detail) => write!(f, "service returned {}: {}", status, detail),
                None => write!(f, "service returned {}", status),
            },
            AppError::Decode(msg) => write!(f, "unexpected response body: {}", msg),
            AppError::Validation(msg) => write!(f, "invalid request: {}", msg),
            AppError::Io(msg) => write!(f, "io error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Status errors are handled before this conversion; what is left is transport or decoding.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::Service {
                status: status.as_u16(),
                detail: None,
            }
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}
