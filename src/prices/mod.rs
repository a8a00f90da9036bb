// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Price Aggregation
//!
//! A thin client for the Jupiter price API plus a background refresher
//! that keeps the latest snapshot in memory. Request handlers only ever
//! read the snapshot; they never call upstream, so `/v1/prices` cannot
//! block on a slow provider.

pub mod client;
pub mod refresher;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

pub use client::{PriceClient, PriceError, TokenPrice};
pub use refresher::PriceRefresher;

/// Shared latest-prices snapshot, written by the refresher.
#[derive(Clone, Default)]
pub struct PriceBook {
    inner: Arc<RwLock<HashMap<String, TokenPrice>>>,
}

impl PriceBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, keyed by mint. Empty before the first successful
    /// refresh.
    pub async fn snapshot(&self) -> HashMap<String, TokenPrice> {
        self.inner.read().await.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Replace the snapshot wholesale. A failed refresh never reaches
    /// here, so stale-but-real data survives provider outages.
    pub async fn replace(&self, next: HashMap<String, TokenPrice>) {
        *self.inner.write().await = next;
    }
}
