// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Passwordless magic-link sign-in for the screener.
//!
//! ## Flow
//!
//! 1. `POST /v1/auth/request` issues a 15-minute magic token and emails a
//!    link carrying it.
//! 2. `GET /v1/auth/verify` verifies the token, consumes it (single use),
//!    issues a 30-day session credential and sets it as a cookie.
//! 3. Subsequent requests carry the cookie; [`session::OptionalSession`]
//!    recovers the identity on each request.
//!
//! ## Security
//!
//! - Both credentials are keyed-MAC (HMAC-SHA256) bearer strings; the
//!   secret is mandatory configuration with no default.
//! - MAC verification is constant-time.
//! - All verification failures are indistinguishable to the caller: the
//!   verifiers return a bare `None` and the HTTP layer maps every failure
//!   to one generic invalid outcome.
//! - Verified magic tokens are recorded in a consumption set so a leaked
//!   link cannot be replayed within its validity window.

pub mod consumed;
pub mod session;
pub mod tokens;

pub use consumed::ConsumedTokens;
pub use session::OptionalSession;
pub use tokens::TokenSigner;
