// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! HMAC bearer-token authentication for the users API.
//!
//! ## Auth Flow
//!
//! 1. An operator issues a token with the `generate_token` utility
//! 2. Clients send `Authorization: Bearer <token>`
//! 3. [`AuthGate`] checks the header shape, then [`TokenCodec`] verifies:
//!    - the header algorithm is in the HMAC family (anything else is refused
//!      before any key is touched)
//!    - the signature under the configured secret
//!    - `exp` against the current time
//!
//! ## Security
//!
//! - All verification failures collapse to a single 401 response
//! - Tokens are not stored server-side and cannot be revoked
//! - The gate does not propagate claims to handlers

pub mod claims;
pub mod error;
pub mod gate;
pub mod token;

pub use claims::Claims;
pub use error::{AuthError, TokenError};
pub use gate::AuthGate;
pub use token::TokenCodec;
