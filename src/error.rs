// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::service::ServiceError;

/// Message used whenever an addressed user does not exist.
pub const USER_NOT_FOUND: &str = "User not found!";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

/// `{"status": "fail", "message": ...}`
#[derive(Serialize, ToSchema)]
pub struct FailBody {
    pub status: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Absent users are reported as a client error, not 404.
    pub fn user_not_found() -> Self {
        Self::bad_request(USER_NOT_FOUND)
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::NotFound(_) => Self::user_not_found(),
            other => {
                tracing::warn!(error = %other, "User operation failed");
                Self::internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(FailBody {
            status: "fail".to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreError;
    use axum::body::to_bytes;
    use std::time::Duration;

    #[test]
    fn constructors_set_status_and_message() {
        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.message, "bad");

        let internal = ApiError::internal("boom");
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);

        let missing = ApiError::user_not_found();
        assert_eq!(missing.status, StatusCode::BAD_REQUEST);
        assert_eq!(missing.message, "User not found!");
    }

    #[test]
    fn service_errors_map_to_status() {
        let missing = ApiError::from(ServiceError::NotFound("u1".into()));
        assert_eq!(missing.status, StatusCode::BAD_REQUEST);
        assert_eq!(missing.message, USER_NOT_FOUND);

        let upstream = ApiError::from(ServiceError::Store(StoreError::Duplicate("u1".into())));
        assert_eq!(upstream.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(upstream.message, "user u1 already exists");

        let slow = ApiError::from(ServiceError::TimedOut(Duration::from_secs(3)));
        assert_eq!(slow.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(slow.message, "operation timed out after 3s");
    }

    #[tokio::test]
    async fn into_response_returns_fail_envelope() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"status":"fail","message":"bad data"}"#);
    }
}
