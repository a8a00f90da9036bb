// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Icon Resolution
//!
//! Locates a display icon for a token through an ordered fallback cascade
//! (provider convention, static asset, third-party CDN, metadata-service
//! discovery) and terminates in a deterministic generated monogram when
//! every upstream tier fails. See [`resolver`] for the cascade itself.

pub mod cache;
pub mod monogram;
pub mod providers;
pub mod resolver;

pub use cache::{CachedIcon, IconCache, MemoryIconCache};
pub use resolver::{IconConfig, IconResolver, ResolvedIcon};
