use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::Error;

const GENERIC_MESSAGE: &str = "Something went wrong";

/// An error already converted to its HTTP shape.
#[derive(Debug)]
pub enum ApiError {
    /// 400 `{error}`.
    BadRequest(String),
    /// 500 `{error, details}` for a failed upstream-facing operation.
    Operation { error: &'static str, details: String },
    /// 500 `{error}` for a local resource that could not be served.
    Resource { error: &'static str },
    /// 500 `{error, message}`; `message` carries detail only in development.
    Internal { message: String },
}

impl ApiError {
    /// Maps a gateway error from an operation that reports `failure` to callers.
    pub fn operation(err: Error, failure: &'static str) -> Self {
        if err.is_client_error() {
            return Self::BadRequest(err.to_string());
        }
        tracing::error!(error = %err, "{failure}");
        Self::Operation {
            error: failure,
            details: err.to_string(),
        }
    }

    pub fn resource(err: &Error, failure: &'static str) -> Self {
        if err.is_client_error() {
            return Self::BadRequest(err.to_string());
        }
        tracing::error!(error = %err, "{failure}");
        Self::Resource { error: failure }
    }

    pub fn internal(detail: &str, expose: bool) -> Self {
        Self::Internal {
            message: if expose { detail.to_string() } else { GENERIC_MESSAGE.to_string() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(error) => (StatusCode::BAD_REQUEST, Json(json!({ "error": error }))).into_response(),
            Self::Operation { error, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": error, "details": details })),
            )
                .into_response(),
            Self::Resource { error } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": error }))).into_response()
            }
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error", "message": message })),
            )
                .into_response(),
        }
    }
}
