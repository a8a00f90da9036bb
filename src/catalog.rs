// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Token Catalog
//!
//! Static, read-only catalog of the tokenized equities shown by the
//! screener. The catalog is compiled in: it changes rarely, and keeping it
//! static avoids a storage dependency for a few dozen rows. The rest of the
//! system only consumes `mint` and `symbol` as lookup keys.

use serde::Serialize;
use utoipa::ToSchema;

/// Issuer family of a tokenized equity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum TokenProvider {
    /// Backed Finance "xStocks" wrapped equities.
    XStocks,
    /// Ondo Finance yield/bond tokens.
    Ondo,
}

/// One catalog entry: a tokenized equity tradable on-chain.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StockToken {
    /// Display ticker, e.g. `AAPLx`.
    pub symbol: &'static str,
    /// Underlying company or product name.
    pub name: &'static str,
    /// On-chain mint address.
    pub mint: &'static str,
    pub provider: TokenProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<&'static str>,
}

const fn xstock(
    symbol: &'static str,
    name: &'static str,
    mint: &'static str,
    sector: &'static str,
) -> StockToken {
    StockToken {
        symbol,
        name,
        mint,
        provider: TokenProvider::XStocks,
        sector: Some(sector),
    }
}

const fn ondo(
    symbol: &'static str,
    name: &'static str,
    mint: &'static str,
    sector: &'static str,
) -> StockToken {
    StockToken {
        symbol,
        name,
        mint,
        provider: TokenProvider::Ondo,
        sector: Some(sector),
    }
}

/// Every token the screener tracks, xStocks first.
pub const ALL_TOKENS: &[StockToken] = &[
    xstock("AAPLx", "Apple", "XsbEhLAtcf6HdfpFZ5xEMdqW8nfAvcsP5bdudRLJzJp", "Tech"),
    xstock("AMZNx", "Amazon", "Xs3eBt7uRfJX8QUs4suhyU8p2M6DoUDrJyWBa8LLZsg", "Retail"),
    xstock("GOOGLx", "Alphabet", "XsCPL9dNWBMvFtTmwcCA5v3xWPSMEBCszbQdiLLq6aN", "Tech"),
    xstock("AMDx", "AMD", "XsXcJ6GZ9kVnjqGsjBnktRcuwMBmvKWh8S93RefZ1rF", "Tech"),
    xstock("ACNx", "Accenture", "Xs5UJzmCRQ8DWZjskExdSQDnbE6iLkRu2jjrRAB1JSU", "Tech"),
    xstock("ABTx", "Abbott", "XsHtf5RpxsQ7jeJ9ivNewouZKJHbPxhPoEy6yYvULr7", "Health"),
    xstock("ABBVx", "AbbVie", "XswbinNKyPmzTa5CskMbCPvMW6G5CMnZXZEeQSSQoie", "Health"),
    xstock("AVGOx", "Broadcom", "XsgSaSvNSqLTtFuyWPBhK9196Xb9Bbdyjj4fH3cPJGo", "Tech"),
    xstock("AZNx", "AstraZeneca", "Xs3ZFkPYT2BN7qBMqf1j1bfTeTm1rFzEFSsQ1z3wAKU", "Health"),
    xstock("BACx", "Bank of America", "XswsQk4duEQmCbGzfqUUWYmi7pV7xpJ9eEmLHXCaEQP", "Finance"),
    xstock("CSCOx", "Cisco", "Xsr3pdLQyXvDJBFgpR5nexCEZwXvigb8wbPYp4YoNFf", "Tech"),
    xstock("CVXx", "Chevron", "XsNNMt7WTNA2sV3jrb1NNfNgapxRF5i4i6GcnTRRHts", "Energy"),
    xstock("CRCLx", "Circle", "XsueG8BtpquVJX9LVLLEGuViXUungE6WmK5YZ3p3bd1", "Crypto"),
    xstock("APPx", "AppLovin", "XsPdAVBi8Zc1xvv53k4JcMrQaEDTgkGqKYeh7AYgPHV", "Tech"),
    ondo("USDY", "Ondo US Dollar Yield", "A1KLoBrKBde8Ty9qtNQUtq3C2ortoC3u7twggz7sEto6", "Yield"),
    ondo("OUSG", "Ondo Short-Term US Govt Bond", "HHjoYFGeAdCYMDgPiDBCcVnwwjMhMZGtB3PcnJJYT2aW", "Bonds"),
];

/// Comma-joined mint list, the shape the price API expects in `ids=`.
pub fn mints_csv() -> String {
    ALL_TOKENS
        .iter()
        .map(|t| t.mint)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn mints_are_unique() {
        let mints: HashSet<_> = ALL_TOKENS.iter().map(|t| t.mint).collect();
        assert_eq!(mints.len(), ALL_TOKENS.len());
    }

    #[test]
    fn symbols_are_unique_and_nonempty() {
        let symbols: HashSet<_> = ALL_TOKENS.iter().map(|t| t.symbol).collect();
        assert_eq!(symbols.len(), ALL_TOKENS.len());
        assert!(ALL_TOKENS.iter().all(|t| !t.symbol.is_empty()));
    }

    #[test]
    fn mints_csv_covers_every_token() {
        let csv = mints_csv();
        assert_eq!(csv.matches(',').count(), ALL_TOKENS.len() - 1);
        assert!(csv.contains("XsbEhLAtcf6HdfpFZ5xEMdqW8nfAvcsP5bdudRLJzJp"));
    }

    #[test]
    fn xstocks_symbols_follow_naming_convention() {
        for token in ALL_TOKENS
            .iter()
            .filter(|t| t.provider == TokenProvider::XStocks)
        {
            assert!(token.symbol.ends_with('x'), "unexpected: {}", token.symbol);
            assert!(token.mint.starts_with("Xs"), "unexpected: {}", token.mint);
        }
    }
}
