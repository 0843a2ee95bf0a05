//! Error types for tallyweb-core
//!
//! Caller errors (bad period, bad range, missing filter values) and store
//! failures share one error type so the HTTP layer can map them to status
//! codes in one place. Each error carries a stable code and a severity.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidPeriod,
    InvalidRange,
    MissingParameter,
    InvalidFormat,
    ValidationError,
    TransactionNotFound,
    IoError,
    StorageError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::InvalidPeriod => write!(f, "INVALID_PERIOD"),
            ErrorCode::InvalidRange => write!(f, "INVALID_RANGE"),
            ErrorCode::MissingParameter => write!(f, "MISSING_PARAMETER"),
            ErrorCode::InvalidFormat => write!(f, "INVALID_FORMAT"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::StorageError => write!(f, "STORAGE_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for tallyweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid period: {message}")]
    InvalidPeriod { message: String },

    #[error("Invalid range: end {end} is before start {start}")]
    InvalidRange { start: String, end: String },

    #[error("Missing parameter: {name}")]
    MissingParameter { name: String },

    #[error("Invalid format for {name}: {message}")]
    InvalidFormat { name: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

impl CoreError {
    pub(crate) fn invalid_period(message: impl Into<String>) -> Self {
        CoreError::InvalidPeriod {
            message: message.into(),
        }
    }

    pub(crate) fn missing(name: &str) -> Self {
        CoreError::MissingParameter {
            name: name.to_string(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::InvalidPeriod { .. } => ErrorCode::InvalidPeriod,
            CoreError::InvalidRange { .. } => ErrorCode::InvalidRange,
            CoreError::MissingParameter { .. } => ErrorCode::MissingParameter,
            CoreError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::TransactionNotFound { .. } => ErrorCode::TransactionNotFound,
            CoreError::IoError { .. } => ErrorCode::IoError,
            CoreError::StorageError { .. } => ErrorCode::StorageError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::InvalidPeriod { .. }
            | CoreError::InvalidRange { .. }
            | CoreError::MissingParameter { .. }
            | CoreError::InvalidFormat { .. }
            | CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::TransactionNotFound { .. } => ErrorSeverity::Info,
            CoreError::IoError { .. } | CoreError::StorageError { .. } => ErrorSeverity::Error,
        }
    }

    /// Whether the caller can fix the request and retry
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self.severity(),
            ErrorSeverity::Warning | ErrorSeverity::Info
        )
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::InvalidPeriod { .. } => {
                details = details.with_suggestion(
                    "Provide month as 1-12 and year as a positive number, e.g. ?month=3&year=2025"
                        .to_string(),
                );
            }
            CoreError::InvalidRange { start, end } => {
                details = details.with_detail(serde_json::json!({ "start": start, "end": end }));
                details = details.with_suggestion(
                    "The end date must not be earlier than the start date.".to_string(),
                );
            }
            CoreError::MissingParameter { name } => {
                details = details.with_detail(serde_json::json!({ "parameter": name }));
                details = details.with_suggestion(format!(
                    "Add the '{}' query parameter to the request.",
                    name
                ));
            }
            CoreError::InvalidFormat { name, .. } => {
                details = details.with_detail(serde_json::json!({ "parameter": name }));
            }
            CoreError::TransactionNotFound { .. } => {
                details = details.with_suggestion(
                    "Use the /api/transactions endpoint to list all transactions.".to_string(),
                );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<io::Error> for CoreError {
    fn from(error: io::Error) -> Self {
        CoreError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::StorageError {
            message: error.to_string(),
        }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
        }
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error at a level matching its severity
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Info => log::debug!(
                target: "tallyweb::error",
                "[{}] {} - Operation: {}",
                error.code(),
                error,
                context.operation
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "tallyweb::error",
                "[{}] {} - Operation: {}",
                error.code(),
                error,
                context.operation
            ),
            ErrorSeverity::Error => log::error!(
                target: "tallyweb::error",
                "[{}] {} - Operation: {}",
                error.code(),
                error.to_details(),
                context.operation
            ),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::InvalidPeriod.to_string(), "INVALID_PERIOD");
        assert_eq!(ErrorCode::MissingParameter.to_string(), "MISSING_PARAMETER");
        assert_eq!(ErrorCode::TransactionNotFound.to_string(), "TRANSACTION_NOT_FOUND");
    }

    #[test]
    fn test_error_code_serde() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::InvalidRange).unwrap(),
            "\"INVALID_RANGE\""
        );
    }

    #[test]
    fn test_caller_errors() {
        assert!(CoreError::invalid_period("month 13").is_caller_error());
        assert!(CoreError::missing("category").is_caller_error());
        assert!(CoreError::TransactionNotFound { id: "x".to_string() }.is_caller_error());
        assert!(!CoreError::StorageError { message: "disk".to_string() }.is_caller_error());
    }

    #[test]
    fn test_core_error_severity() {
        assert_eq!(
            CoreError::invalid_period("bad").severity(),
            ErrorSeverity::Warning
        );
        let io: CoreError = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert_eq!(io.code(), ErrorCode::IoError);
        assert_eq!(io.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_error_details_missing_parameter() {
        let details = CoreError::missing("category").to_details();
        assert_eq!(details.code, ErrorCode::MissingParameter);
        assert!(details.message.contains("category"));
        assert_eq!(
            details.details,
            Some(serde_json::json!({ "parameter": "category" }))
        );
        assert!(!details.suggestions.is_empty());
    }

    #[test]
    fn test_error_details_invalid_range() {
        let error = CoreError::InvalidRange {
            start: "2025-03-10".to_string(),
            end: "2025-03-01".to_string(),
        };
        let rendered = error.to_details().to_string();
        assert!(rendered.starts_with("[INVALID_RANGE]"));
        assert!(rendered.contains("2025-03-01"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("period_summary");
        assert_eq!(context.operation, "period_summary");
    }
}
