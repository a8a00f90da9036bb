// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token icon endpoint. Always answers 200 with image bytes; the cascade
//! ends in a generated monogram, so there is no error path to expose.

use axum::{
    extract::{Query, State},
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::{models::IconParams, state::AppState};

#[utoipa::path(
    get,
    path = "/v1/token-icon",
    params(
        ("mint" = Option<String>, Query, description = "Token mint address"),
        ("symbol" = Option<String>, Query, description = "Display symbol")
    ),
    tag = "Icons",
    responses((status = 200, description = "Icon bytes, possibly a generated placeholder"))
)]
pub async fn token_icon(
    State(state): State<AppState>,
    Query(params): Query<IconParams>,
) -> Response {
    let icon = state.icons.resolve(&params.mint, &params.symbol).await;
    (
        [
            (CONTENT_TYPE, icon.content_type),
            (CACHE_CONTROL, icon.cache_control.to_string()),
        ],
        icon.bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Upstreams in the test state are unroutable, so the cascade falls
    // through to the generated monogram.
    #[tokio::test]
    async fn unresolvable_icon_answers_with_svg_placeholder() {
        let state = AppState::for_tests();
        let response = token_icon(
            State(state),
            Query(IconParams {
                mint: String::new(),
                symbol: "TSLAx".into(),
            }),
        )
        .await;

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );
        let cache = response.headers().get(CACHE_CONTROL).unwrap().to_str().unwrap();
        assert!(cache.contains("max-age=86400"));
    }
}
