// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Resolved-URL cache for the icon cascade.
//!
//! The cache stores only the *location* an icon resolved to (or the fact
//! that a token has none), never image bytes: repeated requests re-fetch
//! bytes but skip re-discovery, which bounds memory while sparing the
//! metadata service. Entries carry no TTL — once a token's icon location is
//! known it is treated as authoritative for the life of the process.
//!
//! The cache is injected as a trait so the default in-process map can be
//! swapped for a shared external cache without touching resolution logic.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

/// A settled discovery outcome for one mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedIcon {
    /// The URL the icon was last successfully located at.
    Url(String),
    /// The token is known to have no real icon; serve the placeholder
    /// without re-discovering.
    NoIcon,
}

/// Key-value store for discovery outcomes, keyed by mint address.
pub trait IconCache: Send + Sync {
    fn get(&self, mint: &str) -> Option<CachedIcon>;
    fn put(&self, mint: &str, entry: CachedIcon);
}

/// Default in-process cache backed by an LRU map.
///
/// The capacity comfortably exceeds the catalog size, so eviction exists
/// only as a safety bound against unbounded growth from arbitrary query
/// input.
pub struct MemoryIconCache {
    cache: Mutex<LruCache<String, CachedIcon>>,
}

impl MemoryIconCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap()),
            )),
        }
    }
}

impl IconCache for MemoryIconCache {
    fn get(&self, mint: &str) -> Option<CachedIcon> {
        let mut cache = self.cache.lock().ok()?;
        cache.get(mint).cloned()
    }

    fn put(&self, mint: &str, entry: CachedIcon) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(mint.to_string(), entry);
        }
    }
}
