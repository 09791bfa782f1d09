use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use tickerwatch_market_data::{
    normalize_bars, HistoryRequest, MarketDataError, MarketDataProvider,
};

use super::quotes_model::{QuoteResult, StockQuote};
use super::quotes_traits::QuoteGatewayTrait;
use crate::constants::{COMPANY_NAME_UNAVAILABLE, RECENT_TRADING_DAYS};

/// Gateway backed directly by a market data provider. Every call goes out
/// to the provider; nothing is cached here.
pub struct MarketDataGateway {
    provider: Arc<dyn MarketDataProvider>,
}

impl MarketDataGateway {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    async fn company_name(&self, symbol: &str) -> String {
        match self.provider.get_profile(symbol).await {
            Ok(profile) => profile
                .display_name()
                .map(str::to_string)
                .unwrap_or_else(|| COMPANY_NAME_UNAVAILABLE.to_string()),
            Err(e) => {
                debug!("No profile for {} from {}: {}", symbol, self.provider.id(), e);
                COMPANY_NAME_UNAVAILABLE.to_string()
            }
        }
    }
}

#[async_trait]
impl QuoteGatewayTrait for MarketDataGateway {
    async fn fetch(&self, symbol: &str) -> QuoteResult {
        let bars = self
            .provider
            .get_price_history(symbol, &HistoryRequest::recent())
            .await
            .map_err(|e| {
                warn!("History fetch for {} failed: {}", symbol, e);
                // An unknown symbol looks the same as an empty history to users
                if e.is_unknown_symbol() {
                    MarketDataError::NoData
                } else {
                    e
                }
            })?;

        let data = normalize_bars(bars, RECENT_TRADING_DAYS);
        if data.is_empty() {
            return Err(MarketDataError::NoData);
        }

        let company_name = self.company_name(symbol).await;

        Ok(StockQuote {
            symbol: symbol.to_string(),
            company_name,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;
    use tickerwatch_market_data::{AssetProfile, PriceBar};

    fn bar(day: u32, close: Decimal) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            adj_close: close,
            volume: 100,
        }
    }

    enum HistoryReply {
        Bars(Vec<PriceBar>),
        NotFound,
        Network,
    }

    enum ProfileReply {
        Named(&'static str),
        Nameless,
        Unsupported,
    }

    struct MockProvider {
        history: HistoryReply,
        profile: ProfileReply,
        profile_calls: Mutex<usize>,
        requests: Mutex<Vec<HistoryRequest>>,
    }

    impl MockProvider {
        fn new(history: HistoryReply, profile: ProfileReply) -> Arc<Self> {
            Arc::new(Self {
                history,
                profile,
                profile_calls: Mutex::new(0),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl MarketDataProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn get_price_history(
            &self,
            symbol: &str,
            request: &HistoryRequest,
        ) -> Result<Vec<PriceBar>, MarketDataError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.history {
                HistoryReply::Bars(bars) => Ok(bars.clone()),
                HistoryReply::NotFound => Err(MarketDataError::SymbolNotFound(symbol.to_string())),
                HistoryReply::Network => Err(MarketDataError::provider("MOCK", "connection reset")),
            }
        }

        async fn get_profile(&self, _symbol: &str) -> Result<AssetProfile, MarketDataError> {
            *self.profile_calls.lock().unwrap() += 1;
            match self.profile {
                ProfileReply::Named(name) => Ok(AssetProfile {
                    name: Some(name.to_string()),
                    ..Default::default()
                }),
                ProfileReply::Nameless => Ok(AssetProfile::default()),
                ProfileReply::Unsupported => Err(MarketDataError::NotSupported {
                    operation: "profile".to_string(),
                    provider: "MOCK".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let provider = MockProvider::new(
            HistoryReply::Bars(vec![bar(5, dec!(2)), bar(4, dec!(1))]),
            ProfileReply::Named("Apple Inc."),
        );
        let gateway = MarketDataGateway::new(provider.clone());

        let quote = gateway.fetch("AAPL").await.unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.company_name, "Apple Inc.");
        assert_eq!(quote.data.len(), 2);
        assert_eq!(quote.data[0].close, dec!(1));

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.as_slice(), &[HistoryRequest::recent()]);
    }

    #[tokio::test]
    async fn test_fetch_keeps_last_five_days() {
        let bars = (1..=8).map(|d| bar(d, Decimal::from(d))).collect();
        let provider = MockProvider::new(HistoryReply::Bars(bars), ProfileReply::Named("X"));
        let gateway = MarketDataGateway::new(provider);

        let quote = gateway.fetch("X").await.unwrap();
        assert_eq!(quote.data.len(), 5);
        assert_eq!(quote.data[0].close, dec!(4));
    }

    #[tokio::test]
    async fn test_fetch_empty_history_is_no_data() {
        let provider = MockProvider::new(HistoryReply::Bars(vec![]), ProfileReply::Named("X"));
        let gateway = MarketDataGateway::new(provider.clone());

        let err = gateway.fetch("ZZZINVALID").await.unwrap_err();
        assert_eq!(err.to_string(), "No data found for the given symbol.");
        // No name lookup once the history came back empty
        assert_eq!(*provider.profile_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fetch_unknown_symbol_is_no_data() {
        let provider = MockProvider::new(HistoryReply::NotFound, ProfileReply::Named("X"));
        let gateway = MarketDataGateway::new(provider);

        let err = gateway.fetch("ZZZINVALID").await.unwrap_err();
        assert!(matches!(err, MarketDataError::NoData));
    }

    #[tokio::test]
    async fn test_fetch_network_error_passes_through() {
        let provider = MockProvider::new(HistoryReply::Network, ProfileReply::Named("X"));
        let gateway = MarketDataGateway::new(provider);

        let err = gateway.fetch("AAPL").await.unwrap_err();
        assert_eq!(err.to_string(), "Provider error: MOCK - connection reset");
    }

    #[tokio::test]
    async fn test_missing_name_uses_placeholder() {
        for profile in [ProfileReply::Nameless, ProfileReply::Unsupported] {
            let provider = MockProvider::new(HistoryReply::Bars(vec![bar(4, dec!(1))]), profile);
            let gateway = MarketDataGateway::new(provider);

            let quote = gateway.fetch("AAPL").await.unwrap();
            assert_eq!(quote.company_name, "Company name unavailable");
        }
    }
}
