// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gate rejecting requests addressed at a user that does not exist.
//!
//! Reads the single path parameter of the matched route as the user id and
//! looks it up through the [`UserService`]. Runs ahead of the bearer gate on
//! update and delete routes, so "not found" is reported even to callers
//! without a token.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

use super::Gate;
use crate::{error::ApiError, scope::OperationScope, service::UserService};

#[derive(Clone)]
pub struct ExistenceGate {
    users: Arc<dyn UserService>,
    timeout: Duration,
}

impl ExistenceGate {
    pub fn new(users: Arc<dyn UserService>, timeout: Duration) -> Self {
        Self { users, timeout }
    }
}

#[async_trait]
impl Gate for ExistenceGate {
    fn name(&self) -> &'static str {
        "user-exists"
    }

    async fn check(&self, parts: &mut Parts) -> Result<(), Response> {
        let user_id = Path::<String>::from_request_parts(parts, &())
            .await
            .map(|Path(id)| id)
            .unwrap_or_default();

        if user_id.is_empty() {
            return Err(ApiError::user_not_found().into_response());
        }

        let scope = OperationScope::new(self.timeout);
        match scope.run(self.users.get_user(&user_id)).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(ApiError::user_not_found().into_response()),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "User lookup failed");
                Err(ApiError::internal(e.to_string()).into_response())
            }
        }
    }
}
