// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Route Gates
//!
//! A gate inspects a request and either lets it through or answers it with a
//! terminal response. Routes compose gates into an ordered [`GateChain`]
//! which runs ahead of the handler through the [`enforce`] middleware:
//!
//! ```rust,ignore
//! let chain = GateChain::new().then(existence_gate).then(auth_gate);
//!
//! put(update_user).layer(axum::middleware::from_fn_with_state(chain, enforce))
//! ```
//!
//! Gates run in insertion order and the first rejection wins; later gates are
//! never consulted for that request.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

pub mod existence;

pub use existence::ExistenceGate;

/// A single request-pipeline filter.
#[async_trait]
pub trait Gate: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Inspect the request head. `Err` carries the response to send instead
    /// of running the rest of the pipeline.
    async fn check(&self, parts: &mut Parts) -> Result<(), Response>;
}

/// Ordered list of gates guarding one route.
#[derive(Clone, Default)]
pub struct GateChain {
    gates: Vec<Arc<dyn Gate>>,
}

impl GateChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a gate; it runs after every gate already in the chain.
    pub fn then(mut self, gate: impl Gate + 'static) -> Self {
        self.gates.push(Arc::new(gate));
        self
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Run every gate in order, stopping at the first rejection.
    pub async fn admit(&self, parts: &mut Parts) -> Result<(), Response> {
        for gate in &self.gates {
            if let Err(rejection) = gate.check(parts).await {
                tracing::debug!(
                    gate = gate.name(),
                    status = rejection.status().as_u16(),
                    path = %parts.uri.path(),
                    "request rejected by gate"
                );
                return Err(rejection);
            }
        }
        Ok(())
    }
}

/// Middleware running a [`GateChain`] before the wrapped handler.
///
/// Use with `axum::middleware::from_fn_with_state(chain, enforce)`.
pub async fn enforce(State(chain): State<GateChain>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();

    if let Err(rejection) = chain.admit(&mut parts).await {
        return rejection;
    }

    next.run(Request::from_parts(parts, body)).await
}
