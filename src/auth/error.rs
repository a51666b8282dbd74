// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Why a token failed to sign or verify.
///
/// These reasons stay inside the service: [`AuthGate`](super::AuthGate)
/// collapses all of them into [`AuthError::InvalidToken`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,

    /// Header `alg` as written in the token, e.g. `none` or `RS256`.
    #[error("unexpected signing algorithm {0}")]
    UnexpectedAlgorithm(String),

    #[error("token has expired")]
    Expired,

    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Authentication error type returned by the bearer gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Header is not exactly `Bearer <token>`
    InvalidAuthHeader,
    /// No signing secret configured for this process
    SecretNotConfigured,
    /// Token failed verification (signature, algorithm, expiry or shape)
    InvalidToken,
}

/// JSON body of every authentication failure.
#[derive(Serialize, ToSchema)]
pub struct AuthErrorBody {
    pub error: String,
}

impl AuthError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader | AuthError::InvalidAuthHeader | AuthError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::SecretNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Missing Authorization header"),
            AuthError::InvalidAuthHeader => write!(f, "Invalid Authorization header format"),
            AuthError::SecretNotConfigured => write!(f, "JWT secret not configured"),
            AuthError::InvalidToken => write!(f, "Invalid or expired token"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
