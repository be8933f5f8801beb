// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use soulcare::error::{AppError, ClientError};

#[test]
fn test_transport_errors_trigger_fallback() {
    assert!(ClientError::NetworkTimeout.is_transport());
    assert!(ClientError::NetworkFailure("connection refused".to_string()).is_transport());
}

#[test]
fn test_other_errors_reach_caller() {
    let remote = ClientError::RemoteApi {
        status: 403,
        message: "Forbidden".to_string(),
    };
    assert!(!remote.is_transport());
    assert_eq!(remote.status(), Some(403));
    assert_eq!(remote.to_string(), "Forbidden");

    assert!(!ClientError::Decode("missing field".to_string()).is_transport());
    assert!(!ClientError::NotFound("Payment x".to_string()).is_transport());
    assert_eq!(ClientError::BadRequest("x".to_string()).status(), None);
}

#[test]
fn test_app_error_status_codes() {
    assert_eq!(
        AppError::Unauthorized.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::BadRequest("nope".to_string())
            .into_response()
            .status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::Internal(anyhow::anyhow!("boom"))
            .into_response()
            .status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
