// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{ConsumedTokens, TokenSigner};
use crate::config::Config;
use crate::email::Mailer;
use crate::icon::{IconConfig, IconResolver, MemoryIconCache};
use crate::prices::PriceBook;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub signer: Arc<TokenSigner>,
    pub consumed: Arc<ConsumedTokens>,
    pub icons: Arc<IconResolver>,
    pub mailer: Arc<Mailer>,
    pub prices: PriceBook,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let signer = TokenSigner::new(config.auth_secret.as_bytes());
        let cache = Arc::new(MemoryIconCache::new(config.icon_cache_capacity));
        let icons = IconResolver::new(IconConfig::from(&config), cache);
        let mailer = Mailer::new(&config);

        Self {
            config: Arc::new(config),
            signer: Arc::new(signer),
            consumed: Arc::new(ConsumedTokens::new()),
            icons: Arc::new(icons),
            mailer: Arc::new(mailer),
            prices: PriceBook::new(),
        }
    }

    /// State wired against unroutable upstreams, for handler tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            public_base_url: "http://localhost:8080".to_string(),
            auth_secret: "test-secret".to_string(),
            sendgrid_api_key: "test-key".to_string(),
            sendgrid_from: "noreply@example.com".to_string(),
            sendgrid_list_id: None,
            metadata_rpc_url: "http://127.0.0.1:1".to_string(),
            static_asset_base: None,
            xstocks_cdn_base: "http://127.0.0.1:1".to_string(),
            price_api_base: "http://127.0.0.1:1".to_string(),
            icon_cache_capacity: 8,
        })
    }
}
