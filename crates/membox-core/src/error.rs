//! Error types module
//!
//! All request failures are unified under the `AppError` enum: unauthorized
//! callers, invalid input, upstream (storage / caption API / session store)
//! failures, and everything else. Collaborator crates keep their own tagged
//! error enums and are converted into `AppError` at the HTTP boundary.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl AppError {
    /// HTTP status code for this error.
    ///
    /// The taxonomy is deliberately small: 401 for a missing/invalid session,
    /// 400 for bad input, 500 for everything else. Failures are terminal for
    /// the request; nothing is retried.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::Unauthorized(_) => 401,
            AppError::BadRequest(_) => 400,
            AppError::Upstream(_) => 500,
            AppError::Internal(_) => 500,
            AppError::InternalWithSource { .. } => 500,
        }
    }

    /// Get the error type name for logging
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Upstream(_) => "Upstream",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Unauthorized(_) | AppError::BadRequest(_) => LogLevel::Debug,
            AppError::Upstream(_) => LogLevel::Error,
            AppError::Internal(_) | AppError::InternalWithSource { .. } => LogLevel::Error,
        }
    }

    /// Message rendered into the `{ "error": … }` response envelope.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::Upstream(msg)
            | AppError::Internal(msg) => msg.clone(),
            AppError::InternalWithSource { message, .. } => message.clone(),
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_metadata() {
        let err = AppError::Unauthorized("Unauthorized. Please log in.".to_string());
        assert_eq!(err.http_status_code(), 401);
        assert_eq!(err.error_type(), "Unauthorized");
        assert_eq!(err.client_message(), "Unauthorized. Please log in.");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_bad_request_metadata() {
        let err = AppError::BadRequest("Image URL is required".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), "Image URL is required");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_upstream_metadata() {
        let err = AppError::Upstream("Failed to generate captions from external API".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_type(), "Upstream");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_internal_with_source_exposes_message() {
        let err = AppError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "boom");
        assert!(err.detailed_message().contains("Internal error"));
    }
}
