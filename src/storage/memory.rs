// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory user store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, StoreResult, UserStore};
use crate::models::User;

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|user| (user.id.clone(), user)).collect()),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_all(&self) -> StoreResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn insert(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(StoreError::Duplicate(user.id.clone()));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn replace(&self, user: &User) -> StoreResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        Ok(self.users.write().await.remove(id).is_some())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn user(id: &str, offset_secs: i64) -> User {
        let at = Utc::now() + Duration::seconds(offset_secs);
        User {
            id: id.into(),
            name: format!("user {id}"),
            email: format!("{id}@example.com"),
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn insert_find_and_list_in_creation_order() {
        let store = InMemoryUserStore::new();
        store.insert(&user("b", 10)).await.unwrap();
        store.insert(&user("a", 20)).await.unwrap();

        assert_eq!(store.find_by_id("b").await.unwrap().unwrap().name, "user b");
        assert!(store.find_by_id("zzz").await.unwrap().is_none());

        let ids: Vec<String> = store.find_all().await.unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = InMemoryUserStore::with_users([user("u1", 0)]);
        let err = store.insert(&user("u1", 5)).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(id) if id == "u1"));
    }

    #[tokio::test]
    async fn replace_and_delete_report_matches() {
        let store = InMemoryUserStore::with_users([user("u1", 0)]);

        let mut changed = user("u1", 0);
        changed.name = "renamed".into();
        assert!(store.replace(&changed).await.unwrap());
        assert_eq!(store.find_by_id("u1").await.unwrap().unwrap().name, "renamed");
        assert!(!store.replace(&user("ghost", 0)).await.unwrap());

        assert!(store.delete("u1").await.unwrap());
        assert!(!store.delete("u1").await.unwrap());
        assert!(store.find_all().await.unwrap().is_empty());
    }
}
