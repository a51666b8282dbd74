// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;
use std::time::Duration;

use crate::{
    auth::{AuthGate, TokenCodec},
    config::Config,
    service::{StoreUserService, UserService},
    storage::UserStore,
};

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub store: Arc<dyn UserStore>,
    pub auth: AuthGate,
    /// Deadline for each user service call made on behalf of a request
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, auth: AuthGate, request_timeout: Duration) -> Self {
        Self {
            users: Arc::new(StoreUserService::new(Arc::clone(&store))),
            store,
            auth,
            request_timeout,
        }
    }

    /// Build the state from configuration; the token codec exists only when a
    /// secret is configured.
    pub fn from_config(config: &Config, store: Arc<dyn UserStore>) -> Self {
        let codec = config
            .jwt_secret
            .as_ref()
            .map(|secret| TokenCodec::new(secret).with_leeway(config.jwt_leeway_secs));
        Self::new(store, AuthGate::new(codec), config.request_timeout)
    }
}
