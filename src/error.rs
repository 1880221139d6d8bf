use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::estimator::EstimationError;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Body or query string that could not be decoded
    InvalidRequest { status: StatusCode, message: String },
    /// Request parameters outside accepted bounds
    ValidationError(String),
    /// Export requested in a format we don't render
    UnsupportedExport(String),
    /// Price estimator failure
    Estimation(EstimationError),
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest { message, .. } => write!(f, "Invalid request: {}", message),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::UnsupportedExport(format) => write!(f, "Unsupported export format: {}", format),
            Self::Estimation(err) => write!(f, "{}", err),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidRequest { status, .. } => *status,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedExport(_) => StatusCode::BAD_REQUEST,
            // every estimator failure is an upstream problem from the caller's view
            Self::Estimation(_) => StatusCode::BAD_GATEWAY,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::InvalidRequest { .. } => "invalid_request",
        AppError::ValidationError(_) => "validation_error",
        AppError::UnsupportedExport(_) => "unsupported_export",
        AppError::Estimation(err) => err.kind(),
        AppError::InternalError(_) => "internal_error",
    }
}

impl From<EstimationError> for AppError {
    fn from(err: EstimationError) -> Self {
        Self::Estimation(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        Self::InternalError(format!("CSV error: {}", err))
    }
}
