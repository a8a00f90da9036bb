// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    catalog::{StockToken, TokenProvider},
    models::{AuthRequest, AuthRequested, MeResponse, SessionUser},
    prices::TokenPrice,
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod icons;
pub mod prices;
pub mod tokens;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/auth/request", post(auth::request_sign_in))
        .route("/auth/verify", get(auth::verify_magic_link))
        .route("/auth/me", get(auth::me))
        .route("/auth/logout", post(auth::logout))
        .route("/token-icon", get(icons::token_icon))
        .route("/prices", get(prices::prices))
        .route("/tokens", get(tokens::tokens));

    Router::new()
        .nest("/v1", v1_routes)
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::request_sign_in,
        auth::verify_magic_link,
        auth::me,
        auth::logout,
        icons::token_icon,
        prices::prices,
        tokens::tokens,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            AuthRequest,
            AuthRequested,
            MeResponse,
            SessionUser,
            StockToken,
            TokenProvider,
            TokenPrice,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Auth", description = "Magic-link sign-in and sessions"),
        (name = "Icons", description = "Token icon resolution"),
        (name = "Prices", description = "Latest token quotes"),
        (name = "Tokens", description = "Token catalog"),
        (name = "Health", description = "Probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::for_tests());
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn liveness_route_answers_ok() {
        let app = router(AppState::for_tests());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn tokens_route_serves_json_catalog() {
        let app = router(AppState::for_tests());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/tokens")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(parsed.as_array().is_some_and(|tokens| !tokens.is_empty()));
    }

    #[tokio::test]
    async fn requests_are_tagged_with_an_id() {
        let app = router(AppState::for_tests());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }
}
