// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body.
///
/// `error` is the human-readable message clients show to users.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let error = match &self {
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error, code })).into_response()
    }
}

/// Unreadable request bodies (bad JSON, wrong field types, missing
/// Content-Type) share the JSON error shape.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced by the API client and its simulation backend.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The remote did not answer within the per-call deadline.
    #[error("Request timed out")]
    NetworkTimeout,

    /// Connection refused, DNS failure, reset mid-body, ...
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// The remote answered with a non-2xx status.
    #[error("{message}")]
    RemoteApi { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The response body did not match the expected shape.
    #[error("Unexpected response shape: {0}")]
    Decode(String),
}

impl ClientError {
    /// Transport-level failures switch the client to the simulation
    /// instead of reaching the caller.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::NetworkTimeout | ClientError::NetworkFailure(_)
        )
    }

    /// HTTP status of a remote rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::NetworkTimeout
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::NetworkFailure(err.to_string())
        }
    }
}
