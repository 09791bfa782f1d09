//! Tickerwatch Market Data Crate
//!
//! This crate fetches recent daily price history and company profiles for
//! ticker symbols from a remote market data provider.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  Ticker symbol   |  ("AAPL", trimmed by the caller)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    Provider      |  (MarketDataProvider: Yahoo, test stubs)
//! +------------------+
//!          |
//!          v
//! +--------------------+
//! | PriceBar / Profile |  (daily OHLCV rows, display name)
//! +--------------------+
//! ```
//!
//! # Core Types
//!
//! - [`MarketDataProvider`] - Trait every provider implements
//! - [`PriceBar`] - One trading day of OHLCV data
//! - [`AssetProfile`] - Provider-sourced profile data (display name, quote type)
//! - [`MarketDataError`] - Errors raised while talking to a provider

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{normalize_bars, AssetProfile, HistoryRequest, PriceBar};
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
