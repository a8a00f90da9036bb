// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Single-use bookkeeping for magic tokens.
//!
//! The credential itself is stateless, so without this set a leaked link
//! would stay redeemable until its natural expiry. The set holds SHA-256
//! digests of already-consumed tokens, keyed to the token's own expiry, and
//! prunes dead entries on every insert. Memory is bounded by the number of
//! sign-ins within one 15-minute window.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use sha2::{Digest, Sha256};

/// In-process set of consumed magic-token digests.
pub struct ConsumedTokens {
    inner: Mutex<HashMap<[u8; 32], i64>>,
}

impl ConsumedTokens {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Record a token as consumed.
    ///
    /// Returns `false` when the token was already consumed (a replay).
    /// `expires_at_ms` is the expiry embedded in the token; the record is
    /// dropped once that instant passes, after which plain expiry checking
    /// takes over.
    pub fn consume(&self, token: &str, expires_at_ms: i64) -> bool {
        self.consume_at(token, expires_at_ms, Utc::now().timestamp_millis())
    }

    fn consume_at(&self, token: &str, expires_at_ms: i64, now_ms: i64) -> bool {
        let digest: [u8; 32] = Sha256::digest(token.as_bytes()).into();
        let Ok(mut seen) = self.inner.lock() else {
            // A poisoned lock means a panic elsewhere; fail closed.
            return false;
        };
        seen.retain(|_, expiry| *expiry > now_ms);
        seen.insert(digest, expires_at_ms).is_none()
    }
}

impl Default for ConsumedTokens {
    fn default() -> Self {
        Self::new()
    }
}
