// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stocks on Solana - Tokenized Equity Screener Backend
//!
//! This crate serves a screener for tokenized equities on Solana: a static
//! token catalog, periodically refreshed quotes, resilient icon resolution,
//! and passwordless magic-link authentication.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Magic-link tokens and session credentials (keyed MAC)
//! - `icon` - Icon resolution cascade with monogram fallback
//! - `prices` - Price API client and background refresher
//! - `catalog` - The static token catalog

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod email;
pub mod error;
pub mod icon;
pub mod models;
pub mod prices;
pub mod state;
