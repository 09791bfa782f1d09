//! In-memory TTL cache in front of a quote gateway, using moka.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use moka::future::Cache;

use super::quotes_model::{QuoteResult, StockQuote};
use super::quotes_traits::QuoteGatewayTrait;

const DEFAULT_MAX_CAPACITY: u64 = 500;

/// Gateway wrapper that remembers successful fetches for a fixed TTL.
///
/// Failures are never cached, so a ticker that errored is retried on the
/// next request.
pub struct CachedQuoteGateway {
    inner: Arc<dyn QuoteGatewayTrait>,
    cache: Cache<String, StockQuote>,
}

impl CachedQuoteGateway {
    pub fn new(inner: Arc<dyn QuoteGatewayTrait>, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(DEFAULT_MAX_CAPACITY)
                .build(),
        }
    }

    /// Drop every cached quote.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

#[async_trait]
impl QuoteGatewayTrait for CachedQuoteGateway {
    async fn fetch(&self, symbol: &str) -> QuoteResult {
        if let Some(quote) = self.cache.get(symbol).await {
            debug!("Quote cache hit for {}", symbol);
            return Ok(quote);
        }

        let quote = self.inner.fetch(symbol).await?;
        self.cache.insert(symbol.to_string(), quote.clone()).await;
        Ok(quote)
    }
}
