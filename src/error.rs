// ABOUTME: Error types for apod-wallpaper
// ABOUTME: Centralizes all error handling for the application

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// A request failed or returned a non-success status
    #[error("Retrieval error: failed to retrieve {url}: {reason}")]
    Retrieval { url: String, reason: String },

    /// A payload or image did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Errors from the IO subsystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic application errors
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// The URL a retrieval error refers to, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            AppError::Retrieval { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Create a retrieval error for the given URL
pub fn retrieval_error<U: Into<String>, R: ToString>(url: U, reason: R) -> AppError {
    AppError::Retrieval {
        url: url.into(),
        reason: reason.to_string(),
    }
}

/// Create a new generic error with a message
pub fn generic_error<S: Into<String>>(message: S) -> AppError {
    AppError::Generic(message.into())
}
