// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! The `User` resource, its request payload, and the success envelope every
//! handler wraps its data in. Failure envelopes live in [`crate::error`] and
//! [`crate::auth::error`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct User {
    /// Unique user identifier (UUID)
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

impl User {
    /// Build a new user from a payload, stamped with `now`.
    pub fn from_payload(id: String, payload: UserPayload, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: payload.name,
            email: payload.email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the mutable fields, keeping identity and creation time.
    pub fn apply(&mut self, payload: UserPayload, now: DateTime<Utc>) {
        self.name = payload.name;
        self.email = payload.email;
        self.updated_at = now;
    }
}

/// `{"status": "success", "message"?: ..., "data": ...}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
