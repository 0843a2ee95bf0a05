//! Error types for tallyweb-api

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tallyweb_core::error::{
    DefaultErrorLogger, ErrorCode, ErrorContext, ErrorDetails, ErrorLogger,
};
use tallyweb_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Bad request: {message}")]
    BadRequest { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(error) => status_for(error.code()),
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn to_details(&self) -> ErrorDetails {
        match self {
            ApiError::Core(error) if error.is_caller_error() => error.to_details(),
            // Storage failures are logged in full; clients get the code only.
            ApiError::Core(error) => ErrorDetails::new(
                error.code(),
                "An internal error occurred".to_string(),
            ),
            ApiError::BadRequest { message } => {
                ErrorDetails::new(ErrorCode::InvalidFormat, message.clone())
            }
        }
    }
}

/// HTTP status for each core error code
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidPeriod
        | ErrorCode::InvalidRange
        | ErrorCode::MissingParameter
        | ErrorCode::InvalidFormat
        | ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
        ErrorCode::TransactionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::IoError | ErrorCode::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Core(error) => {
                DefaultErrorLogger.log_error(error, &ErrorContext::new("http request"))
            }
            ApiError::BadRequest { message } => log::warn!("Rejected request body: {}", message),
        }

        (self.status(), Json(self.to_details())).into_response()
    }
}
