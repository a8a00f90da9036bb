// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;

use crate::catalog::{StockToken, ALL_TOKENS};

/// Serve the static token catalog.
#[utoipa::path(
    get,
    path = "/v1/tokens",
    tag = "Tokens",
    responses((status = 200, description = "The tracked token catalog", body = [StockToken]))
)]
pub async fn tokens() -> Json<&'static [StockToken]> {
    Json(ALL_TOKENS)
}
