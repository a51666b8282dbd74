// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signing and verification of HMAC bearer tokens.
//!
//! ## Algorithm pinning
//!
//! The token header names its own algorithm, so a verifier that trusts it can
//! be steered to `none` or to an asymmetric algorithm keyed with the shared
//! secret. [`TokenCodec::verify`] refuses every header algorithm outside the
//! HMAC family before any signature work happens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Duration;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::Deserialize;

use super::{Claims, TokenError};
use crate::config::Secret;

/// Algorithm used for every token this service issues.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Header algorithms accepted on verification.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Default token lifetime (72 hours).
pub fn default_lifetime() -> Duration {
    Duration::hours(72)
}

/// Stateless token codec keyed by the shared secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
    leeway: u64,
}

impl TokenCodec {
    pub fn new(secret: &Secret) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: default_lifetime(),
            leeway: 0,
        }
    }

    /// Override the lifetime of tokens minted by [`issue`](Self::issue).
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Clock skew tolerance, in seconds, applied to `exp` on verification.
    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway = leeway_secs;
        self
    }

    /// Mint a token for `subject` expiring one lifetime from now.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.sign(&Claims::new(subject, self.lifetime))
    }

    /// Sign an explicit claim set with HS256.
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(SIGNING_ALGORITHM), claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// A token is valid only while the current time is before `exp`
    /// (widened by the configured leeway).
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let alg = header_algorithm(token)?;

        let mut validation = Validation::new(alg);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.leeway = self.leeway;
        // jsonwebtoken only rejects `exp < now`; the expiry instant itself is
        // already invalid.
        validation.reject_tokens_expiring_in_less_than = 1;
        validation.validate_aud = false;

        let token_data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAlgorithm => TokenError::UnexpectedAlgorithm(format!("{alg:?}")),
            _ => TokenError::Malformed(e.to_string()),
        })?;

        Ok(token_data.claims)
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Read the header `alg` as a plain string so that names jsonwebtoken has no
/// variant for (`none`) are reported as algorithm mismatches.
fn header_algorithm(token: &str) -> Result<Algorithm, TokenError> {
    let segment = token.split('.').next().unwrap_or_default();
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::Malformed(e.to_string()))?;
    let header: RawHeader =
        serde_json::from_slice(&bytes).map_err(|e| TokenError::Malformed(e.to_string()))?;

    header
        .alg
        .parse::<Algorithm>()
        .ok()
        .filter(|alg| HMAC_ALGORITHMS.contains(alg))
        .ok_or(TokenError::UnexpectedAlgorithm(header.alg))
}
