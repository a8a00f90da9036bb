// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session cookie handling and the axum extractor for it.
//!
//! The session credential rides in an HTTP-only, Secure, SameSite=Lax
//! cookie named `session`. The primitive itself has no HTTP knowledge;
//! everything cookie-shaped lives here.

use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts},
};

use super::tokens::SESSION_TTL_SECS;
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Build the `Set-Cookie` value carrying a freshly issued session.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age={SESSION_TTL_SECS}"
    )
}

/// Build the `Set-Cookie` value that clears the session on logout.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age=0")
}

/// Pull one cookie's value out of a `Cookie` request header.
fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Extractor yielding the authenticated email, if any.
///
/// Never rejects: an absent, malformed, or expired session simply yields
/// `None`, and the handler decides what anonymous means for its route.
pub struct OptionalSession(pub Option<String>);

impl FromRequestParts<AppState> for OptionalSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let email = parts
            .headers
            .get(COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| cookie_value(h, SESSION_COOKIE))
            .and_then(|token| state.signer.verify_session(token));
        Ok(OptionalSession(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn session_cookie_sets_security_attributes() {
        let cookie = session_cookie("abc.def.ghi");
        assert!(cookie.starts_with("session=abc.def.ghi;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=2592000"));
    }

    #[test]
    fn clear_cookie_zeroes_max_age() {
        let cookie = clear_session_cookie();
        assert!(cookie.starts_with("session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn cookie_value_finds_named_cookie() {
        let header = "theme=dark; session=tok-123; locale=en";
        assert_eq!(cookie_value(header, "session"), Some("tok-123"));
        assert_eq!(cookie_value(header, "missing"), None);
    }

    #[test]
    fn cookie_value_handles_values_containing_equals() {
        let header = "session=a=b=c";
        assert_eq!(cookie_value(header, "session"), Some("a=b=c"));
    }

    #[tokio::test]
    async fn extractor_returns_email_for_valid_session() {
        let state = AppState::for_tests();
        let session = state.signer.issue_session("a@b.com");
        let mut parts = Request::builder()
            .uri("/test")
            .header("Cookie", format!("session={session}"))
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let OptionalSession(email) = OptionalSession::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(email.as_deref(), Some("a@b.com"));
    }

    #[tokio::test]
    async fn extractor_returns_none_without_cookie() {
        let state = AppState::for_tests();
        let mut parts = Request::builder()
            .uri("/test")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let OptionalSession(email) = OptionalSession::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(email.is_none());
    }

    #[tokio::test]
    async fn extractor_returns_none_for_garbage_session() {
        let state = AppState::for_tests();
        let mut parts = Request::builder()
            .uri("/test")
            .header("Cookie", "session=not-a-real-token")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let OptionalSession(email) = OptionalSession::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(email.is_none());
    }
}
