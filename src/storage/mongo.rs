// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! MongoDB-backed user store.
//!
//! Users live in the `users` collection of the configured database, one
//! document per user keyed by `_id` (the user's UUID string).

use std::time::Duration;

use async_trait::async_trait;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::ClientOptions,
    Client, Collection, Database,
};
use serde::{Deserialize, Serialize};

use super::{StoreError, StoreResult, UserStore};
use crate::models::User;

/// Upper bound on client construction plus the initial ping.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

const USERS_COLLECTION: &str = "users";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Stored shape of a user: the id is `_id` and timestamps are BSON dates
/// (millisecond precision).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    email: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    updated_at: DateTime<Utc>,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            email: doc.email,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

pub struct MongoUserStore {
    database: Database,
    users: Collection<UserDocument>,
}

impl MongoUserStore {
    /// Connect to `uri` and open `database`, giving up after [`CONNECT_TIMEOUT`].
    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        tokio::time::timeout(CONNECT_TIMEOUT, Self::connect_inner(uri, database))
            .await
            .map_err(|_| StoreError::ConnectTimeout(CONNECT_TIMEOUT))?
    }

    async fn connect_inner(uri: &str, database: &str) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);

        let client = Client::with_options(options)?;
        let database = client.database(database);
        database.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(database = %database.name(), "Connected to MongoDB");

        Ok(Self {
            users: database.collection(USERS_COLLECTION),
            database,
        })
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_all(&self) -> StoreResult<Vec<User>> {
        let cursor = self.users.find(doc! {}).await?;
        let docs: Vec<UserDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.users.find_one(doc! { "_id": id }).await?.map(User::from))
    }

    async fn insert(&self, user: &User) -> StoreResult<()> {
        match self.users.insert_one(UserDocument::from(user)).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(StoreError::Duplicate(user.id.clone())),
            Err(e) => Err(e.into()),
        }
    }

    async fn replace(&self, user: &User) -> StoreResult<bool> {
        let result = self
            .users
            .replace_one(doc! { "_id": user.id.as_str() }, UserDocument::from(user))
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = self.users.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}
