// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token claim set.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Subject used when the issuer is not given one explicitly.
pub const DEFAULT_SUBJECT: &str = "example_user";

/// Claims carried by every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Always `true` for tokens minted by this service
    pub authorized: bool,

    /// Subject the token was issued for
    pub user: String,

    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Claims for `subject` that expire `lifetime` from now.
    pub fn new(subject: impl Into<String>, lifetime: Duration) -> Self {
        Self::expiring_at(subject, Utc::now() + lifetime)
    }

    pub fn expiring_at(subject: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            authorized: true,
            user: subject.into(),
            exp: expires_at.timestamp(),
        }
    }
}
