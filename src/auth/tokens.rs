// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Magic-link and session credentials built on HMAC-SHA256.
//!
//! Both credentials are self-verifying bearer strings: the payload and a
//! keyed MAC over it travel together, so validation needs no server-side
//! record. A magic token is `base64url(email:expiry_ms).base64url(mac)` and
//! lives 15 minutes; a session is HS256-shaped (`header.payload.sig`, JSON
//! claims) and lives 30 days.
//!
//! MAC comparison goes through `Mac::verify_slice`, which is constant-time
//! with respect to the secret. Every failure mode (bad encoding, wrong
//! segment count, MAC mismatch, expiry) collapses into `None` so callers
//! cannot distinguish a forged credential from an expired one.

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Magic-link validity window.
pub const MAGIC_TOKEN_TTL_MS: i64 = 15 * 60 * 1000;

/// Session validity window, also used for the cookie Max-Age.
pub const SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

const SESSION_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Outcome of a successful magic-token verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedMagicToken {
    /// The email address that requested sign-in.
    pub email: String,
    /// Absolute expiry embedded in the token, for single-use bookkeeping.
    pub expires_at_ms: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    email: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies both credential kinds with one server-held secret.
pub struct TokenSigner {
    key: Vec<u8>,
}

impl TokenSigner {
    /// The secret comes from mandatory configuration; see [`crate::config`].
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: secret.to_vec(),
        }
    }

    /// Issue a magic token for `email`, expiring 15 minutes from now.
    ///
    /// Pure function of `(email, now, secret)` — no storage side effect.
    /// The caller hands the token to the email collaborator for delivery.
    pub fn issue_magic_token(&self, email: &str) -> String {
        self.issue_magic_token_at(email, Utc::now().timestamp_millis())
    }

    /// Verify a magic token, returning the embedded email on success.
    pub fn verify_magic_token(&self, token: &str) -> Option<VerifiedMagicToken> {
        self.verify_magic_token_at(token, Utc::now().timestamp_millis())
    }

    /// Issue a 30-day session credential for an authenticated email.
    pub fn issue_session(&self, email: &str) -> String {
        self.issue_session_at(email, Utc::now().timestamp())
    }

    /// Verify a session credential, returning the embedded email on success.
    pub fn verify_session(&self, token: &str) -> Option<String> {
        self.verify_session_at(token, Utc::now().timestamp())
    }

    fn issue_magic_token_at(&self, email: &str, now_ms: i64) -> String {
        let expiry = now_ms + MAGIC_TOKEN_TTL_MS;
        let payload = Base64UrlUnpadded::encode_string(format!("{email}:{expiry}").as_bytes());
        let sig = self.sign(payload.as_bytes());
        format!("{payload}.{sig}")
    }

    fn verify_magic_token_at(&self, token: &str, now_ms: i64) -> Option<VerifiedMagicToken> {
        let mut segments = token.split('.');
        let payload = segments.next()?;
        let sig = segments.next()?;
        if segments.next().is_some() {
            return None;
        }

        self.verify(payload.as_bytes(), sig)?;

        let decoded = Base64UrlUnpadded::decode_vec(payload).ok()?;
        let text = String::from_utf8(decoded).ok()?;
        // The email may itself contain ':' in the local part; the expiry is
        // always the final segment.
        let (email, expiry) = text.rsplit_once(':')?;
        let expires_at_ms: i64 = expiry.parse().ok()?;
        if email.is_empty() || now_ms >= expires_at_ms {
            return None;
        }
        Some(VerifiedMagicToken {
            email: email.to_string(),
            expires_at_ms,
        })
    }

    fn issue_session_at(&self, email: &str, now_secs: i64) -> String {
        let header = Base64UrlUnpadded::encode_string(SESSION_HEADER.as_bytes());
        let claims = SessionClaims {
            email: email.to_string(),
            iat: now_secs,
            exp: now_secs + SESSION_TTL_SECS,
        };
        // SessionClaims contains no map types, so serialization cannot fail;
        // fall back to an empty payload that will simply never verify.
        let payload = Base64UrlUnpadded::encode_string(
            serde_json::to_string(&claims).unwrap_or_default().as_bytes(),
        );
        let signing_input = format!("{header}.{payload}");
        let sig = self.sign(signing_input.as_bytes());
        format!("{signing_input}.{sig}")
    }

    fn verify_session_at(&self, token: &str, now_secs: i64) -> Option<String> {
        let mut segments = token.split('.');
        let header = segments.next()?;
        let payload = segments.next()?;
        let sig = segments.next()?;
        if segments.next().is_some() {
            return None;
        }

        self.verify(format!("{header}.{payload}").as_bytes(), sig)?;

        let decoded = Base64UrlUnpadded::decode_vec(payload).ok()?;
        let claims: SessionClaims = serde_json::from_slice(&decoded).ok()?;
        if now_secs >= claims.exp {
            return None;
        }
        Some(claims.email)
    }

    fn sign(&self, data: &[u8]) -> String {
        let mut mac = self.mac();
        mac.update(data);
        Base64UrlUnpadded::encode_string(&mac.finalize().into_bytes())
    }

    fn verify(&self, data: &[u8], sig: &str) -> Option<()> {
        let tag = Base64UrlUnpadded::decode_vec(sig).ok()?;
        let mut mac = self.mac();
        mac.update(data);
        mac.verify_slice(&tag).ok()
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length; new_from_slice cannot fail here.
        HmacSha256::new_from_slice(&self.key).expect("HMAC-SHA256 key setup")
    }
}
