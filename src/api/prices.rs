// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::collections::HashMap;

use axum::{extract::State, Json};

use crate::{prices::TokenPrice, state::AppState};

/// Serve the in-memory price snapshot. Never calls upstream; the
/// background refresher owns that.
#[utoipa::path(
    get,
    path = "/v1/prices",
    tag = "Prices",
    responses((status = 200, description = "Latest quotes keyed by mint", body = HashMap<String, TokenPrice>))
)]
pub async fn prices(State(state): State<AppState>) -> Json<HashMap<String, TokenPrice>> {
    Json(state.prices.snapshot().await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn prices_serves_the_current_snapshot() {
        let state = AppState::for_tests();
        let mut snapshot = HashMap::new();
        snapshot.insert(
            "MintA".to_string(),
            TokenPrice {
                id: "MintA".to_string(),
                price: "212.31".to_string(),
                price_type: None,
            },
        );
        state.prices.replace(snapshot).await;

        let Json(body) = prices(State(state)).await;
        assert_eq!(body["MintA"].price, "212.31");
    }

    #[tokio::test]
    async fn prices_before_first_refresh_is_empty_object() {
        let state = AppState::for_tests();
        let Json(body) = prices(State(state)).await;
        assert!(body.is_empty());
    }
}
