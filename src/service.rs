// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User business logic.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{User, UserPayload};
use crate::storage::{StoreError, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("user {0} not found")]
    NotFound(String),

    #[error("operation timed out after {0:?}")]
    TimedOut(Duration),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Create/read/update/delete operations on users.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_users(&self) -> ServiceResult<Vec<User>>;

    /// `Ok(None)` when no user has this id.
    async fn get_user(&self, id: &str) -> ServiceResult<Option<User>>;

    async fn create_user(&self, payload: UserPayload) -> ServiceResult<User>;

    async fn update_user(&self, id: &str, payload: UserPayload) -> ServiceResult<User>;

    async fn delete_user(&self, id: &str) -> ServiceResult<()>;
}

/// [`UserService`] over any [`UserStore`].
pub struct StoreUserService {
    store: Arc<dyn UserStore>,
}

impl StoreUserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserService for StoreUserService {
    async fn get_users(&self) -> ServiceResult<Vec<User>> {
        Ok(self.store.find_all().await?)
    }

    async fn get_user(&self, id: &str) -> ServiceResult<Option<User>> {
        Ok(self.store.find_by_id(id).await?)
    }

    async fn create_user(&self, payload: UserPayload) -> ServiceResult<User> {
        let user = User::from_payload(Uuid::new_v4().to_string(), payload, Utc::now());
        self.store.insert(&user).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: &str, payload: UserPayload) -> ServiceResult<User> {
        let mut user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        user.apply(payload, Utc::now());

        if !self.store.replace(&user).await? {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        tracing::info!(user_id = %id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: &str) -> ServiceResult<()> {
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryUserStore;

    fn service() -> StoreUserService {
        StoreUserService::new(Arc::new(InMemoryUserStore::new()))
    }

    fn payload(name: &str) -> UserPayload {
        UserPayload {
            name: name.into(),
            email: format!("{name}@example.com"),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let service = service();
        let user = service.create_user(payload("ada")).await.unwrap();

        assert!(Uuid::parse_str(&user.id).is_ok());
        assert_eq!(user.name, "ada");
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(service.get_user(&user.id).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn get_missing_user_is_none() {
        assert_eq!(service().get_user("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_creation_time() {
        let service = service();
        let created = service.create_user(payload("ada")).await.unwrap();

        let updated = service.update_user(&created.id, payload("grace")).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "grace");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let listed = service.get_users().await.unwrap();
        assert_eq!(listed, vec![updated]);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_user_are_not_found() {
        let service = service();
        let err = service.update_user("ghost", payload("x")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(id) if id == "ghost"));

        let err = service.delete_user("ghost").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_user() {
        let service = service();
        let user = service.create_user(payload("ada")).await.unwrap();

        service.delete_user(&user.id).await.unwrap();
        assert_eq!(service.get_user(&user.id).await.unwrap(), None);
    }
}
