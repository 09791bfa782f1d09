//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - The Yahoo Finance implementation
//!
//! Providers receive a ticker symbol that has already been trimmed and
//! validated by the caller. They do not cache; caching belongs to the layer
//! that composes providers into a quote gateway.

mod traits;

pub mod yahoo;

pub use traits::MarketDataProvider;
