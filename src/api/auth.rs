// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Magic-link sign-in endpoints.
//!
//! Flow: `POST /v1/auth/request` mails a short-lived signed link;
//! `GET /v1/auth/verify` exchanges it (exactly once) for a session cookie.
//! Every verification failure collapses into the same redirect so the
//! response does not reveal which check rejected the token.

use axum::{
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Json,
};
use tracing::{info, warn};

use crate::{
    auth::{
        session::{clear_session_cookie, session_cookie},
        OptionalSession,
    },
    error::ApiError,
    models::{AuthRequest, AuthRequested, MeResponse, SessionUser, VerifyParams},
    state::AppState,
};

/// Where a successful verification lands.
const POST_LOGIN_REDIRECT: &str = "/dashboard";
/// Where every failed verification lands, reason withheld.
const FAILED_LOGIN_REDIRECT: &str = "/?error=invalid";

#[utoipa::path(
    post,
    path = "/v1/auth/request",
    request_body = AuthRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Magic link sent", body = AuthRequested),
        (status = 400, description = "Invalid email"),
        (status = 502, description = "Mail delivery failed")
    )
)]
pub async fn request_sign_in(
    State(state): State<AppState>,
    Json(request): Json<AuthRequest>,
) -> Result<Json<AuthRequested>, ApiError> {
    let email = normalize_email(&request.email).ok_or_else(|| ApiError::bad_request("invalid email"))?;

    let token = state.signer.issue_magic_token(&email);
    let magic_url = format!(
        "{}/v1/auth/verify?token={}",
        state.config.public_base_url, token
    );

    // Marketing upsert is best effort and must not delay the response.
    {
        let mailer = state.mailer.clone();
        let email = email.clone();
        tokio::spawn(async move {
            mailer.upsert_marketing_contact(&email).await;
        });
    }

    state
        .mailer
        .send_magic_link(&email, &magic_url)
        .await
        .map_err(|e| {
            warn!(error = %e, "magic-link mail delivery failed");
            ApiError::bad_gateway("could not send sign-in email")
        })?;

    info!("magic link sent");
    Ok(Json(AuthRequested { ok: true }))
}

#[utoipa::path(
    get,
    path = "/v1/auth/verify",
    params(("token" = String, Query, description = "Magic token from the emailed link")),
    tag = "Auth",
    responses(
        (status = 303, description = "Redirect; session cookie set on success")
    )
)]
pub async fn verify_magic_link(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    let Some(verified) = state.signer.verify_magic_token(&params.token) else {
        return Redirect::to(FAILED_LOGIN_REDIRECT).into_response();
    };

    // Single use: a replayed link fails even while still within its TTL.
    if !state.consumed.consume(&params.token, verified.expires_at_ms) {
        return Redirect::to(FAILED_LOGIN_REDIRECT).into_response();
    }

    let session = state.signer.issue_session(&verified.email);
    info!("sign-in verified");
    (
        AppendHeaders([(SET_COOKIE, session_cookie(&session))]),
        Redirect::to(POST_LOGIN_REDIRECT),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/v1/auth/me",
    tag = "Auth",
    responses((status = 200, description = "Current principal, null when anonymous", body = MeResponse))
)]
pub async fn me(session: OptionalSession) -> Json<MeResponse> {
    Json(MeResponse {
        user: session.0.map(|email| SessionUser { email }),
    })
}

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    tag = "Auth",
    responses((status = 200, description = "Session cookie cleared", body = AuthRequested))
)]
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Json(AuthRequested { ok: true }),
    )
}

/// Trim, lowercase, and shallow-validate an email address.
///
/// Deep RFC validation is pointless here: the address only has to be
/// deliverable, and delivery is the real check.
fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(email)
}
