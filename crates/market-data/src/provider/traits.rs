//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{AssetProfile, HistoryRequest, PriceBar};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use tickerwatch_market_data::{MarketDataError, MarketDataProvider, HistoryRequest, PriceBar};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn get_price_history(
///         &self,
///         symbol: &str,
///         request: &HistoryRequest,
///     ) -> Result<Vec<PriceBar>, MarketDataError> {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging and
    /// error attribution.
    fn id(&self) -> &'static str;

    /// Fetch daily price bars for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The ticker symbol, already trimmed
    /// * `request` - Interval and lookback range
    ///
    /// # Returns
    ///
    /// Bars ordered by date ascending. An empty vector means the provider
    /// knows nothing for the range; callers decide whether that is an error.
    async fn get_price_history(
        &self,
        symbol: &str,
        request: &HistoryRequest,
    ) -> Result<Vec<PriceBar>, MarketDataError>;

    /// Fetch asset profile information.
    ///
    /// Default implementation returns `NotSupported`.
    async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        let _ = symbol;
        Err(MarketDataError::NotSupported {
            operation: "profile".to_string(),
            provider: self.id().to_string(),
        })
    }
}
