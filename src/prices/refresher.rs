// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Price Refresher
//!
//! Background task that re-fetches the full catalog's quotes every
//! `refresh_interval` (default 30 s) and swaps them into the shared
//! [`PriceBook`]. A failed sweep keeps the previous snapshot, so readers
//! see stale prices rather than none during provider outages.
//!
//! ## Shutdown
//!
//! Uses `tokio_util::sync::CancellationToken` for graceful shutdown.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::{PriceBook, PriceClient};
use crate::catalog;

/// Default interval between refresh sweeps.
const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

pub struct PriceRefresher {
    client: PriceClient,
    book: PriceBook,
    refresh_interval: Duration,
}

impl PriceRefresher {
    pub fn new(client: PriceClient, book: PriceBook) -> Self {
        Self {
            client,
            book,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    /// Run the refresh loop until the cancellation token is triggered.
    ///
    /// Should be spawned as a background task:
    /// ```rust,ignore
    /// tokio::spawn(refresher.run(shutdown.clone()));
    /// ```
    pub async fn run(self, shutdown: CancellationToken) {
        info!(
            interval_secs = self.refresh_interval.as_secs(),
            "Price refresher starting"
        );

        loop {
            if shutdown.is_cancelled() {
                info!("Price refresher shutting down");
                return;
            }

            self.refresh_step().await;

            tokio::select! {
                _ = tokio::time::sleep(self.refresh_interval) => {},
                _ = shutdown.cancelled() => {
                    info!("Price refresher shutting down");
                    return;
                }
            }
        }
    }

    /// Execute one sweep: fetch quotes for every catalog mint.
    async fn refresh_step(&self) {
        match self.client.fetch_prices(&catalog::mints_csv()).await {
            Ok(quotes) => {
                info!(count = quotes.len(), "Price refresher: snapshot updated");
                self.book.replace(quotes).await;
            }
            Err(e) => {
                warn!(error = %e, "Price refresher: sweep failed, keeping last snapshot");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_exits_promptly_on_cancellation() {
        let refresher = PriceRefresher::new(
            PriceClient::new("http://127.0.0.1:1".to_string()),
            PriceBook::new(),
        );
        let shutdown = CancellationToken::new();
        shutdown.cancel();

        // An already-cancelled token must stop the loop on entry.
        tokio::time::timeout(Duration::from_secs(5), refresher.run(shutdown))
            .await
            .expect("refresher did not honor cancellation");
    }

    #[tokio::test]
    async fn failed_sweep_keeps_previous_snapshot() {
        let book = PriceBook::new();
        let mut seed = std::collections::HashMap::new();
        seed.insert(
            "MintA".to_string(),
            super::super::TokenPrice {
                id: String::new(),
                price: "7".to_string(),
                price_type: None,
            },
        );
        book.replace(seed).await;

        let refresher = PriceRefresher::new(
            PriceClient::new("http://127.0.0.1:1".to_string()),
            book.clone(),
        );
        refresher.refresh_step().await;

        assert_eq!(book.snapshot().await["MintA"].price, "7");
    }
}
