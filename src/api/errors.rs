//! Client-facing error payloads shared by the resource handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::ServiceError;

/// Body returned for every translated failure: when it happened, the HTTP
/// status, a short error title, the human-readable message and the request
/// path that triggered it.
#[derive(Debug, Serialize)]
pub struct StandardError {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

pub fn error_response(err: ServiceError, path: &str) -> Response {
    let (status, title, message) = match err {
        ServiceError::NotFound(message) => (StatusCode::NOT_FOUND, "Resource not Found", message),
        ServiceError::Database(message) => (StatusCode::BAD_REQUEST, "Database exception", message),
        ServiceError::Internal(message) => {
            tracing::error!("unhandled service error on {}: {}", path, message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "Unexpected error".to_string(),
            )
        }
    };

    standard(status, title, message, path)
}

/// Payload rejections never reach the services, but they wear the same body.
pub fn validation_response(message: String, path: &str) -> Response {
    standard(StatusCode::BAD_REQUEST, "Validation exception", message, path)
}

fn standard(status: StatusCode, error: &str, message: String, path: &str) -> Response {
    let body = StandardError {
        timestamp: Utc::now(),
        status: status.as_u16(),
        error: error.to_string(),
        message,
        path: path.to_string(),
    };

    (status, Json(body)).into_response()
}
