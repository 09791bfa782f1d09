//! Quotes module - stock lookups against a market data provider.
//!
//! - `quotes_gateway` - Fetches recent bars and a display name from a provider
//! - `quotes_cache` - Optional TTL cache wrapping any gateway
//! - `quotes_service` - Home page lookup flow

mod quotes_cache;
mod quotes_gateway;
mod quotes_model;
mod quotes_service;
mod quotes_traits;

pub use quotes_cache::CachedQuoteGateway;
pub use quotes_gateway::MarketDataGateway;
pub use quotes_model::{QuoteLookup, QuoteResult, StockQuote};
pub use quotes_service::QuoteService;
pub use quotes_traits::{QuoteGatewayTrait, QuoteServiceTrait};
