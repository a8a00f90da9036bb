// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response shapes for the REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation. Domain types live next to their logic (see
//! [`crate::catalog`] and [`crate::prices`]); this module only holds the
//! thin HTTP envelopes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /v1/auth/request`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthRequest {
    /// Address to send the magic link to.
    pub email: String,
}

/// Acknowledgement that a magic link was sent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthRequested {
    pub ok: bool,
}

/// Query string of `GET /v1/auth/verify`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VerifyParams {
    /// The magic token from the emailed link.
    pub token: String,
}

/// The authenticated principal, as much of it as the service knows.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub email: String,
}

/// Response of `GET /v1/auth/me`. `user` is `null` for anonymous callers;
/// the endpoint itself never rejects.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub user: Option<SessionUser>,
}

/// Query string of `GET /v1/token-icon`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IconParams {
    /// Mint address; may be absent for purely symbol-keyed lookups.
    #[serde(default)]
    pub mint: String,
    /// Display symbol, used for CDN layout and the monogram fallback.
    #[serde(default = "default_symbol")]
    pub symbol: String,
}

fn default_symbol() -> String {
    "??".to_string()
}
