// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Provider-family classification and per-family discovery rules.
//!
//! Different token families publish icons differently: xStocks has a
//! deterministic CDN layout, PreStocks has none, and Ondo tokens ship no
//! real icons at all. Keeping the rules in a tagged table (rather than
//! string-suffix branching inside the cascade) keeps new families cheap
//! to add.

/// Issuer family inferred from a token's mint and symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFamily {
    /// Backed Finance wrapped equities (`Xs…` mints, `…x` symbols).
    XStocks,
    /// PreStocks pre-IPO tokens (`Pre…` mints).
    PreStocks,
    /// Ondo yield/bond tokens (`…ondo` mints).
    Ondo,
    /// No recognized naming convention.
    Unknown,
}

/// How icon discovery should proceed for a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryRule {
    /// Deterministic CDN location; no discovery call needed.
    KnownCdn,
    /// No naming convention; ask the metadata service.
    MetadataLookup,
    /// Family known to ship no icons; go straight to the placeholder.
    NoIcon,
}

impl ProviderFamily {
    pub fn classify(mint: &str, symbol: &str) -> Self {
        if mint.starts_with("Xs") || symbol.ends_with('x') {
            ProviderFamily::XStocks
        } else if mint.starts_with("Pre") {
            ProviderFamily::PreStocks
        } else if mint.ends_with("ondo") {
            ProviderFamily::Ondo
        } else {
            ProviderFamily::Unknown
        }
    }

    pub fn discovery_rule(&self) -> DiscoveryRule {
        match self {
            ProviderFamily::XStocks => DiscoveryRule::KnownCdn,
            ProviderFamily::PreStocks | ProviderFamily::Unknown => DiscoveryRule::MetadataLookup,
            ProviderFamily::Ondo => DiscoveryRule::NoIcon,
        }
    }
}

/// The deterministic xStocks logo location for a symbol.
pub fn known_cdn_url(cdn_base: &str, symbol: &str) -> String {
    format!("{cdn_base}/logos/tokens/{symbol}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xstocks_recognized_by_mint_prefix() {
        let family = ProviderFamily::classify("XsbEhLAtcf6HdfpFZ5xEMdqW8nfAvcsP5bdudRLJzJp", "AAPLx");
        assert_eq!(family, ProviderFamily::XStocks);
        assert_eq!(family.discovery_rule(), DiscoveryRule::KnownCdn);
    }

    #[test]
    fn xstocks_recognized_by_symbol_suffix_alone() {
        assert_eq!(
            ProviderFamily::classify("SomeRandomMint", "TSLAx"),
            ProviderFamily::XStocks
        );
        assert_eq!(
            ProviderFamily::classify("SomeRandomMint", "NVDA.Bx"),
            ProviderFamily::XStocks
        );
    }

    #[test]
    fn prestocks_recognized_by_mint_prefix() {
        let family = ProviderFamily::classify("PreAbc123", "SPACE");
        assert_eq!(family, ProviderFamily::PreStocks);
        assert_eq!(family.discovery_rule(), DiscoveryRule::MetadataLookup);
    }

    #[test]
    fn ondo_routed_straight_to_placeholder() {
        let family = ProviderFamily::classify("A1KLoBrKBde8Ty9qtNQUtq3C2ortoC3u7twggz7sEto6", "USDY");
        // The real USDY mint does not end in "ondo"; use the convention form.
        assert_eq!(family, ProviderFamily::Unknown);

        let family = ProviderFamily::classify("SomethingEndingInondo", "USDY");
        assert_eq!(family, ProviderFamily::Ondo);
        assert_eq!(family.discovery_rule(), DiscoveryRule::NoIcon);
    }

    #[test]
    fn unknown_tokens_use_metadata_lookup() {
        let family = ProviderFamily::classify("So11111111111111111111111111111111111111112", "SOL");
        assert_eq!(family, ProviderFamily::Unknown);
        assert_eq!(family.discovery_rule(), DiscoveryRule::MetadataLookup);
    }

    #[test]
    fn cdn_url_is_deterministic() {
        assert_eq!(
            known_cdn_url("https://cdn.example.com", "AAPLx"),
            "https://cdn.example.com/logos/tokens/AAPLx.png"
        );
    }
}
