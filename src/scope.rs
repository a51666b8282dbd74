// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-operation deadline.
//!
//! Every handler (and the existence gate) opens an [`OperationScope`] before
//! talking to the user service. The store call runs as a future owned by
//! [`OperationScope::run`]: when the deadline passes, or when the handler
//! future itself is dropped (client gone, handler returned, unwinding), that
//! future is dropped with it and the in-flight store call is abandoned.

use std::future::Future;
use std::time::Duration;

use crate::service::{ServiceError, ServiceResult};

/// Time-bounded context for one unit of work.
#[derive(Debug, Clone, Copy)]
pub struct OperationScope {
    timeout: Duration,
}

impl OperationScope {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run `operation` until it completes or the deadline passes.
    pub async fn run<T, F>(&self, operation: F) -> ServiceResult<T>
    where
        F: Future<Output = ServiceResult<T>>,
    {
        tokio::time::timeout(self.timeout, operation)
            .await
            .map_err(|_| ServiceError::TimedOut(self.timeout))?
    }
}
