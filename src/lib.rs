// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Users API - User CRUD service with bearer-token authentication
//!
//! Exposes create/read/update/delete on a `User` resource stored in MongoDB.
//! Read-by-id and mutation routes are protected by HMAC-signed bearer tokens
//! issued out of band by the `generate_token` utility.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers and router (Axum)
//! - `auth` - Token codec and bearer gate
//! - `gates` - Ordered request gates and the existence gate
//! - `service` - User business logic
//! - `storage` - MongoDB and in-memory user stores

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod gates;
pub mod logging;
pub mod models;
pub mod scope;
pub mod service;
pub mod state;
pub mod storage;
