// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # User Storage
//!
//! The [`UserStore`] trait is the seam between the user service and the
//! document database. Two implementations ship:
//!
//! - [`MongoUserStore`] - MongoDB collection `users`, used in production
//! - [`InMemoryUserStore`] - `HashMap` behind an async lock, used by tests and
//!   `USER_STORE=memory`

use std::time::Duration;

use async_trait::async_trait;

use crate::models::User;

pub mod memory;
pub mod mongo;

pub use memory::InMemoryUserStore;
pub use mongo::MongoUserStore;

/// Error type for user store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),

    #[error("user {0} already exists")]
    Duplicate(String),

    #[error("database connection timed out after {0:?}")]
    ConnectTimeout(Duration),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Document store holding users keyed by id.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_all(&self) -> StoreResult<Vec<User>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    /// Insert a new user; fails with [`StoreError::Duplicate`] if the id is taken.
    async fn insert(&self, user: &User) -> StoreResult<()>;

    /// Replace the stored user with the same id. Returns `false` when no
    /// user matched.
    async fn replace(&self, user: &User) -> StoreResult<bool>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Round-trip to the backend for readiness checks.
    async fn ping(&self) -> StoreResult<()>;
}
