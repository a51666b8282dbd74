// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token gate.
//!
//! Admits a request only if it carries `Authorization: Bearer <token>` with a
//! token that verifies under the configured secret and has not expired.
//! Verification-only: the decoded claims are not attached to the request.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    response::{IntoResponse, Response},
};

use super::{AuthError, Claims, TokenCodec};
use crate::gates::Gate;

/// Request gate requiring a valid bearer token.
#[derive(Clone)]
pub struct AuthGate {
    codec: Option<Arc<TokenCodec>>,
}

impl AuthGate {
    /// Gate verifying with `codec`, or answering 500 for every request that
    /// gets past header parsing when no codec (no secret) is configured.
    pub fn new(codec: Option<TokenCodec>) -> Self {
        Self {
            codec: codec.map(Arc::new),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.codec.is_some()
    }

    /// Check the `Authorization` header and verify its token.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let header = match headers.get(AUTHORIZATION) {
            Some(value) if !value.is_empty() => value,
            _ => return Err(AuthError::MissingAuthHeader),
        };

        let header = header.to_str().map_err(|_| AuthError::InvalidAuthHeader)?;
        let token = bearer_token(header)?;

        let Some(codec) = &self.codec else {
            tracing::error!("bearer token presented but no JWT secret is configured");
            return Err(AuthError::SecretNotConfigured);
        };

        codec.verify(token).map_err(|reason| {
            tracing::debug!(%reason, "bearer token rejected");
            AuthError::InvalidToken
        })
    }
}

#[async_trait]
impl Gate for AuthGate {
    fn name(&self) -> &'static str {
        "bearer"
    }

    async fn check(&self, parts: &mut Parts) -> Result<(), Response> {
        self.authorize(&parts.headers)
            .map(|_| ())
            .map_err(IntoResponse::into_response)
    }
}

/// Split `Bearer <token>` on single spaces; anything other than exactly two
/// parts with the literal scheme `Bearer` and a non-empty token is rejected.
fn bearer_token(header: &str) -> Result<&str, AuthError> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::InvalidAuthHeader),
    }
}
