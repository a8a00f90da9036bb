// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Jupiter Price API v2 client.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const PRICE_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    #[error("price request failed: {0}")]
    Request(String),

    #[error("price response was invalid: {0}")]
    InvalidResponse(String),
}

/// One quote as the price API reports it. The price stays a decimal
/// string; the screener renders it, it never does arithmetic on it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenPrice {
    #[serde(default)]
    pub id: String,
    pub price: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub price_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    #[serde(default)]
    data: HashMap<String, Option<TokenPrice>>,
}

pub struct PriceClient {
    base_url: String,
    http: Client,
}

impl PriceClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }

    /// Fetch quotes for a comma-joined mint list.
    ///
    /// The API returns `null` for mints it cannot price; those are dropped
    /// from the result rather than surfaced as errors.
    pub async fn fetch_prices(
        &self,
        mints_csv: &str,
    ) -> Result<HashMap<String, TokenPrice>, PriceError> {
        let url = format!("{}/price/v2?ids={}", self.base_url, mints_csv);
        let response = self
            .http
            .get(&url)
            .timeout(PRICE_REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| PriceError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PriceError::Request(format!(
                "price API returned {}",
                response.status()
            )));
        }

        let payload: PriceResponse = response
            .json()
            .await
            .map_err(|e| PriceError::InvalidResponse(e.to_string()))?;

        Ok(payload
            .data
            .into_iter()
            .filter_map(|(mint, quote)| quote.map(|q| (mint, q)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parsing_drops_null_quotes() {
        let raw = r#"{
            "data": {
                "MintA": { "id": "MintA", "type": "derivedPrice", "price": "212.31" },
                "MintB": null
            }
        }"#;
        let parsed: PriceResponse = serde_json::from_str(raw).unwrap();
        let quotes: HashMap<String, TokenPrice> = parsed
            .data
            .into_iter()
            .filter_map(|(mint, quote)| quote.map(|q| (mint, q)))
            .collect();

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes["MintA"].price, "212.31");
        assert_eq!(quotes["MintA"].price_type.as_deref(), Some("derivedPrice"));
    }

    #[test]
    fn response_parsing_tolerates_missing_data_field() {
        let parsed: PriceResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.data.is_empty());
    }

    #[tokio::test]
    async fn unreachable_api_reports_request_error() {
        let client = PriceClient::new("http://127.0.0.1:1".to_string());
        let err = client.fetch_prices("MintA").await.unwrap_err();
        assert!(matches!(err, PriceError::Request(_)));
    }
}
