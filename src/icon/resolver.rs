// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The icon resolution cascade.
//!
//! Tiers, cheapest first; the first usable response wins:
//!
//! 1. Provider-family classification gives a deterministic CDN URL for
//!    families with a known layout (no discovery round trip).
//! 2. A pre-provisioned static asset keyed by symbol, if an asset origin
//!    is configured.
//! 3. The family CDN URL fetched from the third-party host.
//! 4. Metadata-service discovery (`getAsset` JSON-RPC), then a fetch of
//!    the declared image URI.
//! 5. A generated SVG monogram, which always succeeds.
//!
//! Every upstream attempt carries its own timeout, and every failure —
//! non-success status, network error, timeout, malformed response — simply
//! advances the cascade. The caller never sees an error.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::cache::{CachedIcon, IconCache};
use super::monogram::{monogram_svg, SVG_CONTENT_TYPE};
use super::providers::{known_cdn_url, DiscoveryRule, ProviderFamily};
use crate::config::Config;

/// Pattern-matched and statically-provisioned assets are effectively
/// immutable; give them a month.
const CACHE_STATIC: &str = "public, max-age=2592000, immutable";
/// Upstream-fetched icons get a week.
const CACHE_UPSTREAM: &str = "public, max-age=604800, immutable";
/// Placeholders stay short-lived so a later real icon can be picked up.
const CACHE_PLACEHOLDER: &str = "public, max-age=86400";

const DEFAULT_STATIC_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_CDN_TIMEOUT: Duration = Duration::from_secs(4);
const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(3);
const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(3);

/// Per-tier attempt bounds. Timeouts are per attempt, never cumulative.
#[derive(Debug, Clone)]
pub struct IconTimeouts {
    pub static_asset: Duration,
    pub cdn: Duration,
    pub discovery: Duration,
    pub image: Duration,
}

impl Default for IconTimeouts {
    fn default() -> Self {
        Self {
            static_asset: DEFAULT_STATIC_TIMEOUT,
            cdn: DEFAULT_CDN_TIMEOUT,
            discovery: DEFAULT_DISCOVERY_TIMEOUT,
            image: DEFAULT_IMAGE_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IconConfig {
    /// Origin serving pre-provisioned `{symbol}.png` assets, if any.
    pub static_asset_base: Option<String>,
    pub xstocks_cdn_base: String,
    pub metadata_rpc_url: String,
    pub timeouts: IconTimeouts,
}

impl From<&Config> for IconConfig {
    fn from(config: &Config) -> Self {
        Self {
            static_asset_base: config.static_asset_base.clone(),
            xstocks_cdn_base: config.xstocks_cdn_base.clone(),
            metadata_rpc_url: config.metadata_rpc_url.clone(),
            timeouts: IconTimeouts::default(),
        }
    }
}

/// Image bytes plus the headers the HTTP layer should attach.
#[derive(Debug, Clone)]
pub struct ResolvedIcon {
    pub bytes: Bytes,
    pub content_type: String,
    pub cache_control: &'static str,
}

/// What the metadata service said about a mint.
enum Discovered {
    /// A well-formed `http(s)` image URI.
    Image(String),
    /// The service answered but declared no usable image.
    Absent,
    /// The service was unreachable, slow, or returned garbage.
    Unavailable,
}

pub struct IconResolver {
    config: IconConfig,
    cache: Arc<dyn IconCache>,
    http: Client,
}

impl IconResolver {
    pub fn new(config: IconConfig, cache: Arc<dyn IconCache>) -> Self {
        Self {
            config,
            cache,
            http: Client::new(),
        }
    }

    /// Resolve an icon for a token. Never fails; the placeholder is the
    /// guaranteed terminal tier.
    pub async fn resolve(&self, mint: &str, symbol: &str) -> ResolvedIcon {
        // A settled discovery outcome short-circuits everything but the
        // byte fetch itself.
        if !mint.is_empty() {
            match self.cache.get(mint) {
                Some(CachedIcon::Url(url)) => {
                    if let Some(icon) = self
                        .fetch_image(&url, self.config.timeouts.cdn, CACHE_UPSTREAM)
                        .await
                    {
                        return icon;
                    }
                    // The cached location stopped working; serve the
                    // placeholder rather than re-running discovery.
                    return self.placeholder(symbol);
                }
                Some(CachedIcon::NoIcon) => return self.placeholder(symbol),
                None => {}
            }
        }

        let family = ProviderFamily::classify(mint, symbol);
        let known_url = match family.discovery_rule() {
            DiscoveryRule::NoIcon => {
                if !mint.is_empty() {
                    self.cache.put(mint, CachedIcon::NoIcon);
                }
                return self.placeholder(symbol);
            }
            DiscoveryRule::KnownCdn => {
                Some(known_cdn_url(&self.config.xstocks_cdn_base, symbol))
            }
            DiscoveryRule::MetadataLookup => None,
        };

        // Tier 2: pre-provisioned static asset.
        if let Some(base) = &self.config.static_asset_base {
            let static_url = format!("{base}/{symbol}.png");
            if let Some(icon) = self
                .fetch_image(&static_url, self.config.timeouts.static_asset, CACHE_STATIC)
                .await
            {
                if !mint.is_empty() {
                    self.cache.put(mint, CachedIcon::Url(static_url));
                }
                return icon;
            }
        }

        // Tier 3: the convention-derived CDN location.
        if let Some(url) = known_url {
            if let Some(icon) = self
                .fetch_image(&url, self.config.timeouts.cdn, CACHE_UPSTREAM)
                .await
            {
                if !mint.is_empty() {
                    self.cache.put(mint, CachedIcon::Url(url));
                }
                return icon;
            }
        }

        // Tier 4: metadata-service discovery.
        if !mint.is_empty() {
            match self.discover_image_url(mint).await {
                Discovered::Image(url) => {
                    if let Some(icon) = self
                        .fetch_image(&url, self.config.timeouts.image, CACHE_UPSTREAM)
                        .await
                    {
                        self.cache.put(mint, CachedIcon::Url(url));
                        return icon;
                    }
                }
                Discovered::Absent => {
                    // Authoritative answer: this token declares no image.
                    self.cache.put(mint, CachedIcon::NoIcon);
                }
                Discovered::Unavailable => {
                    // Transient; leave the cache empty so a later request
                    // can retry discovery.
                }
            }
        }

        self.placeholder(symbol)
    }

    /// Fetch image bytes with a per-attempt bound. Any failure yields
    /// `None` and the cascade moves on.
    async fn fetch_image(
        &self,
        url: &str,
        timeout: Duration,
        cache_control: &'static str,
    ) -> Option<ResolvedIcon> {
        let response = match self.http.get(url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url, error = %e, "icon fetch failed");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(url, status = %response.status(), "icon fetch returned non-success");
            return None;
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/png")
            .to_string();

        let bytes = response.bytes().await.ok()?;
        if bytes.is_empty() {
            return None;
        }

        Some(ResolvedIcon {
            bytes,
            content_type,
            cache_control,
        })
    }

    /// Ask the metadata service for a mint's declared image URI.
    async fn discover_image_url(&self, mint: &str) -> Discovered {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getAsset",
            "params": { "id": mint },
        });

        let response = match self
            .http
            .post(&self.config.metadata_rpc_url)
            .json(&body)
            .timeout(self.config.timeouts.discovery)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(mint, error = %e, "metadata discovery request failed");
                return Discovered::Unavailable;
            }
        };

        if !response.status().is_success() {
            warn!(mint, status = %response.status(), "metadata discovery returned non-success");
            return Discovered::Unavailable;
        }

        let payload: Value = match response.json().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(mint, error = %e, "metadata discovery response was not JSON");
                return Discovered::Unavailable;
            }
        };

        match payload
            .pointer("/result/content/links/image")
            .and_then(Value::as_str)
        {
            Some(raw) if is_http_url(raw) => Discovered::Image(raw.to_string()),
            Some(_) | None => Discovered::Absent,
        }
    }

    fn placeholder(&self, symbol: &str) -> ResolvedIcon {
        ResolvedIcon {
            bytes: Bytes::from(monogram_svg(symbol)),
            content_type: SVG_CONTENT_TYPE.to_string(),
            cache_control: CACHE_PLACEHOLDER,
        }
    }
}

/// Accept only `http`/`https` image URIs from discovery; anything else
/// (ipfs schemes, data URIs, relative paths) falls through.
fn is_http_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
