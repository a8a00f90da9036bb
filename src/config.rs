// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup. Secrets are
//! mandatory and carry no fallback defaults: a process started without them
//! refuses to boot rather than silently running with a guessable key.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `PUBLIC_BASE_URL` | External URL used in magic links | `http://localhost:8080` |
//! | `AUTH_SECRET` | HMAC key for magic tokens and sessions | **Required** |
//! | `SENDGRID_API_KEY` | SendGrid mail-send API key | **Required** |
//! | `SENDGRID_FROM` | Sender address for magic-link mail | `noreply@stocksonsolana.com` |
//! | `SENDGRID_LIST_ID` | Marketing list for sign-up upserts | Optional |
//! | `METADATA_RPC_URL` | Asset-metadata JSON-RPC endpoint (incl. key) | **Required** |
//! | `STATIC_ASSET_BASE` | Origin serving pre-provisioned icons | Optional |
//! | `XSTOCKS_CDN_BASE` | xStocks logo CDN | `https://xstocks-metadata.backed.fi` |
//! | `PRICE_API_BASE` | Jupiter price API | `https://api.jup.ag` |
//! | `ICON_CACHE_CAPACITY` | Icon URL cache capacity | `512` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_SENDGRID_FROM: &str = "noreply@stocksonsolana.com";
const DEFAULT_XSTOCKS_CDN_BASE: &str = "https://xstocks-metadata.backed.fi";
const DEFAULT_PRICE_API_BASE: &str = "https://api.jup.ag";
const DEFAULT_ICON_CACHE_CAPACITY: usize = 512;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable missing: {0}")]
    Missing(&'static str),

    #[error("environment variable {0} is invalid: {1}")]
    Invalid(&'static str, String),
}

/// Process-wide configuration, loaded once in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Externally reachable base URL, embedded in magic-link emails.
    pub public_base_url: String,
    /// Keyed-MAC secret for magic tokens and session credentials.
    pub auth_secret: String,
    pub sendgrid_api_key: String,
    pub sendgrid_from: String,
    pub sendgrid_list_id: Option<String>,
    /// JSON-RPC endpoint answering `getAsset` for icon discovery.
    pub metadata_rpc_url: String,
    /// Origin serving pre-provisioned `{symbol}.png` assets, if any.
    pub static_asset_base: Option<String>,
    pub xstocks_cdn_base: String,
    pub price_api_base: String,
    pub icon_cache_capacity: usize,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Fails when any mandatory secret is unset or empty. There are no
    /// insecure fallback values for secrets.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env_optional("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::Invalid("PORT", e.to_string()))?,
            None => DEFAULT_PORT,
        };

        let icon_cache_capacity = match env_optional("ICON_CACHE_CAPACITY") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| ConfigError::Invalid("ICON_CACHE_CAPACITY", e.to_string()))?,
            None => DEFAULT_ICON_CACHE_CAPACITY,
        };

        Ok(Self {
            host: env_or_default("HOST", DEFAULT_HOST),
            port,
            public_base_url: trim_trailing_slash(env_or_default(
                "PUBLIC_BASE_URL",
                DEFAULT_PUBLIC_BASE_URL,
            )),
            auth_secret: env_required("AUTH_SECRET")?,
            sendgrid_api_key: env_required("SENDGRID_API_KEY")?,
            sendgrid_from: env_or_default("SENDGRID_FROM", DEFAULT_SENDGRID_FROM),
            sendgrid_list_id: env_optional("SENDGRID_LIST_ID"),
            metadata_rpc_url: env_required("METADATA_RPC_URL")?,
            static_asset_base: env_optional("STATIC_ASSET_BASE").map(trim_trailing_slash),
            xstocks_cdn_base: trim_trailing_slash(env_or_default(
                "XSTOCKS_CDN_BASE",
                DEFAULT_XSTOCKS_CDN_BASE,
            )),
            price_api_base: trim_trailing_slash(env_or_default(
                "PRICE_API_BASE",
                DEFAULT_PRICE_API_BASE,
            )),
            icon_cache_capacity,
        })
    }
}

fn env_required(name: &'static str) -> Result<String, ConfigError> {
    env_optional(name).ok_or(ConfigError::Missing(name))
}

fn env_optional(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    env_optional(name).unwrap_or_else(|| default.to_string())
}

fn trim_trailing_slash(value: String) -> String {
    value.trim_end_matches('/').to_string()
}
