use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::watchlist_model::{AddTickerOutcome, NewWatchlistEntry, WatchlistEntry};
use super::watchlist_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};
use crate::constants::{DUPLICATE_TICKER_MESSAGE, INVALID_FORM_MESSAGE, STOCK_DELETED_MESSAGE};
use crate::errors::{DatabaseError, Error, Result};
use crate::notices::Notices;
use crate::quotes::{QuoteGatewayTrait, StockQuote};

pub struct WatchlistService {
    repository: Arc<dyn WatchlistRepositoryTrait>,
    gateway: Arc<dyn QuoteGatewayTrait>,
}

impl WatchlistService {
    pub fn new(
        repository: Arc<dyn WatchlistRepositoryTrait>,
        gateway: Arc<dyn QuoteGatewayTrait>,
    ) -> Self {
        WatchlistService {
            repository,
            gateway,
        }
    }
}

#[async_trait]
impl WatchlistServiceTrait for WatchlistService {
    fn list_entries(&self) -> Result<Vec<WatchlistEntry>> {
        self.repository.list_entries()
    }

    /// Fetches every stored ticker in store order, one at a time. A failed
    /// ticker becomes a warning and is left out of the output.
    async fn refresh(&self, notices: &mut Notices) -> Result<Vec<StockQuote>> {
        let entries = self.repository.list_entries()?;
        let mut output = Vec::with_capacity(entries.len());

        for entry in entries {
            match self.gateway.fetch(&entry.ticker).await {
                Ok(quote) => output.push(quote),
                Err(e) => {
                    warn!("Refresh of {} failed: {}", entry.ticker, e);
                    notices.warning(format!(
                        "Error fetching data for ticker {}: {}",
                        entry.ticker, e
                    ));
                }
            }
        }

        Ok(output)
    }

    async fn add_ticker(
        &self,
        ticker: Option<&str>,
        notices: &mut Notices,
    ) -> Result<AddTickerOutcome> {
        let ticker = ticker.map(str::trim).unwrap_or_default();
        if ticker.is_empty() {
            notices.error(INVALID_FORM_MESSAGE);
            return Ok(AddTickerOutcome::InvalidForm);
        }

        if self.repository.ticker_exists(ticker)? {
            notices.error(DUPLICATE_TICKER_MESSAGE);
            return Ok(AddTickerOutcome::Duplicate {
                ticker: ticker.to_string(),
            });
        }

        if let Err(e) = self.gateway.fetch(ticker).await {
            debug!("Rejecting {}: probe failed: {}", ticker, e);
            notices.error(format!(
                "Error occurred due to invalid stock ticker '{}': {}",
                ticker, e
            ));
            return Ok(AddTickerOutcome::InvalidTicker {
                ticker: ticker.to_string(),
            });
        }

        let new_entry = NewWatchlistEntry {
            ticker: ticker.to_string(),
        };
        match self.repository.insert_entry(new_entry).await {
            Ok(entry) => {
                info!("Added {} to watchlist as entry {}", entry.ticker, entry.id);
                notices.success(format!("Stock {} has been added!", entry.ticker));
                Ok(AddTickerOutcome::Added(entry))
            }
            // Lost a race with a concurrent add of the same ticker
            Err(e) if e.is_unique_violation() => {
                notices.error(DUPLICATE_TICKER_MESSAGE);
                Ok(AddTickerOutcome::Duplicate {
                    ticker: ticker.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn delete_entry(&self, entry_id: i32, notices: &mut Notices) -> Result<()> {
        let removed = self.repository.delete_entry(entry_id).await?;
        if removed == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Watchlist entry {} not found",
                entry_id
            ))));
        }
        info!("Deleted watchlist entry {}", entry_id);
        notices.success(STOCK_DELETED_MESSAGE);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notices::NoticeLevel;
    use crate::quotes::QuoteResult;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use tickerwatch_market_data::MarketDataError;

    // =========================================================================
    // Mock repository
    // =========================================================================

    #[derive(Default)]
    struct MockRepository {
        entries: Mutex<Vec<WatchlistEntry>>,
        next_id: Mutex<i32>,
        /// Simulates a row inserted by another request after the exists check
        race_on_insert: bool,
    }

    impl MockRepository {
        fn with_tickers(tickers: &[&str]) -> Arc<Self> {
            let repo = Self::default();
            for ticker in tickers {
                repo.push(ticker);
            }
            Arc::new(repo)
        }

        fn push(&self, ticker: &str) -> WatchlistEntry {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let entry = WatchlistEntry {
                id: *next_id,
                ticker: ticker.to_string(),
            };
            self.entries.lock().unwrap().push(entry.clone());
            entry
        }

        fn tickers(&self) -> Vec<String> {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.ticker.clone())
                .collect()
        }
    }

    #[async_trait]
    impl WatchlistRepositoryTrait for MockRepository {
        fn list_entries(&self) -> Result<Vec<WatchlistEntry>> {
            Ok(self.entries.lock().unwrap().clone())
        }

        fn ticker_exists(&self, ticker: &str) -> Result<bool> {
            Ok(self.entries.lock().unwrap().iter().any(|e| e.ticker == ticker))
        }

        async fn insert_entry(&self, new_entry: NewWatchlistEntry) -> Result<WatchlistEntry> {
            if self.race_on_insert {
                return Err(Error::Database(DatabaseError::UniqueViolation(
                    "UNIQUE constraint failed: watchlist.ticker".to_string(),
                )));
            }
            Ok(self.push(&new_entry.ticker))
        }

        async fn delete_entry(&self, entry_id: i32) -> Result<usize> {
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|e| e.id != entry_id);
            Ok(before - entries.len())
        }
    }

    // =========================================================================
    // Mock gateway
    // =========================================================================

    #[derive(Default)]
    struct MockGateway {
        invalid: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl MockGateway {
        fn rejecting(tickers: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                invalid: tickers.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            })
        }
    }

    #[async_trait]
    impl QuoteGatewayTrait for MockGateway {
        async fn fetch(&self, symbol: &str) -> QuoteResult {
            self.calls.lock().unwrap().push(symbol.to_string());
            if self.invalid.contains(symbol) {
                return Err(MarketDataError::NoData);
            }
            Ok(StockQuote {
                symbol: symbol.to_string(),
                company_name: format!("{} Corp", symbol),
                data: vec![],
            })
        }
    }

    fn service(
        repo: Arc<MockRepository>,
        gateway: Arc<MockGateway>,
    ) -> WatchlistService {
        WatchlistService::new(repo, gateway)
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    #[tokio::test]
    async fn test_refresh_skips_failures_with_warning() {
        let repo = MockRepository::with_tickers(&["AAPL", "BADX", "MSFT"]);
        let gateway = MockGateway::rejecting(&["BADX"]);
        let service = service(repo, gateway.clone());
        let mut notices = Notices::new();

        let output = service.refresh(&mut notices).await.unwrap();

        let symbols: Vec<&str> = output.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
        assert_eq!(*gateway.calls.lock().unwrap(), vec!["AAPL", "BADX", "MSFT"]);

        let drained = notices.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].level, NoticeLevel::Warning);
        assert_eq!(
            drained[0].message,
            "Error fetching data for ticker BADX: No data found for the given symbol."
        );
    }

    #[tokio::test]
    async fn test_refresh_empty_store() {
        let service = service(MockRepository::with_tickers(&[]), MockGateway::rejecting(&[]));
        let mut notices = Notices::new();

        assert!(service.refresh(&mut notices).await.unwrap().is_empty());
        assert!(notices.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_is_repeatable() {
        let repo = MockRepository::with_tickers(&["AAPL", "MSFT"]);
        let service = service(repo, MockGateway::rejecting(&[]));

        let first = service.refresh(&mut Notices::new()).await.unwrap();
        let second = service.refresh(&mut Notices::new()).await.unwrap();
        assert_eq!(first, second);
    }

    // =========================================================================
    // Add
    // =========================================================================

    #[tokio::test]
    async fn test_add_valid_ticker() {
        let repo = MockRepository::with_tickers(&[]);
        let service = service(repo.clone(), MockGateway::rejecting(&[]));
        let mut notices = Notices::new();

        let outcome = service.add_ticker(Some(" AAPL "), &mut notices).await.unwrap();

        assert_eq!(
            outcome,
            AddTickerOutcome::Added(WatchlistEntry {
                id: 1,
                ticker: "AAPL".to_string()
            })
        );
        assert_eq!(repo.tickers(), vec!["AAPL"]);
        let drained = notices.drain();
        assert_eq!(drained[0].level, NoticeLevel::Success);
        assert_eq!(drained[0].message, "Stock AAPL has been added!");
    }

    #[tokio::test]
    async fn test_add_blank_is_invalid_form() {
        let repo = MockRepository::with_tickers(&[]);
        let gateway = MockGateway::rejecting(&[]);
        let service = service(repo.clone(), gateway.clone());

        for input in [None, Some(""), Some("  ")] {
            let mut notices = Notices::new();
            let outcome = service.add_ticker(input, &mut notices).await.unwrap();
            assert_eq!(outcome, AddTickerOutcome::InvalidForm);
            assert_eq!(
                notices.drain()[0].message,
                "Form is not valid, please check your input."
            );
        }
        assert!(repo.tickers().is_empty());
        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_duplicate_rejected_without_probe() {
        let repo = MockRepository::with_tickers(&["AAPL"]);
        let gateway = MockGateway::rejecting(&[]);
        let service = service(repo.clone(), gateway.clone());
        let mut notices = Notices::new();

        let outcome = service.add_ticker(Some("AAPL"), &mut notices).await.unwrap();

        assert_eq!(
            outcome,
            AddTickerOutcome::Duplicate {
                ticker: "AAPL".to_string()
            }
        );
        assert_eq!(repo.tickers().len(), 1);
        assert!(gateway.calls.lock().unwrap().is_empty());
        assert_eq!(
            notices.drain()[0].message,
            "Ticker already exists in the database."
        );
    }

    #[tokio::test]
    async fn test_add_invalid_ticker_not_persisted() {
        let repo = MockRepository::with_tickers(&["MSFT"]);
        let service = service(repo.clone(), MockGateway::rejecting(&["ZZZINVALID"]));
        let mut notices = Notices::new();

        let outcome = service
            .add_ticker(Some("ZZZINVALID"), &mut notices)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AddTickerOutcome::InvalidTicker {
                ticker: "ZZZINVALID".to_string()
            }
        );
        assert_eq!(repo.tickers(), vec!["MSFT"]);
        let drained = notices.drain();
        assert_eq!(drained[0].level, NoticeLevel::Error);
        assert_eq!(
            drained[0].message,
            "Error occurred due to invalid stock ticker 'ZZZINVALID': No data found for the given symbol."
        );
    }

    #[tokio::test]
    async fn test_add_unique_violation_reported_as_duplicate() {
        let repo = Arc::new(MockRepository {
            race_on_insert: true,
            ..Default::default()
        });
        let service = service(repo.clone(), MockGateway::rejecting(&[]));
        let mut notices = Notices::new();

        let outcome = service.add_ticker(Some("AAPL"), &mut notices).await.unwrap();

        assert!(matches!(outcome, AddTickerOutcome::Duplicate { .. }));
        assert_eq!(
            notices.drain()[0].message,
            "Ticker already exists in the database."
        );
    }

    #[tokio::test]
    async fn test_tickers_are_case_sensitive() {
        let repo = MockRepository::with_tickers(&["AAPL"]);
        let service = service(repo.clone(), MockGateway::rejecting(&[]));

        let outcome = service
            .add_ticker(Some("aapl"), &mut Notices::new())
            .await
            .unwrap();

        assert!(matches!(outcome, AddTickerOutcome::Added(_)));
        assert_eq!(repo.tickers(), vec!["AAPL", "aapl"]);
    }

    // =========================================================================
    // Delete
    // =========================================================================

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let repo = MockRepository::with_tickers(&["AAPL", "MSFT", "GOOG"]);
        let service = service(repo.clone(), MockGateway::rejecting(&[]));
        let mut notices = Notices::new();

        service.delete_entry(2, &mut notices).await.unwrap();

        assert_eq!(repo.tickers(), vec!["AAPL", "GOOG"]);
        let drained = notices.drain();
        assert_eq!(drained[0].level, NoticeLevel::Success);
        assert_eq!(drained[0].message, "Stock has been deleted!");
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let repo = MockRepository::with_tickers(&["AAPL"]);
        let service = service(repo.clone(), MockGateway::rejecting(&[]));
        let mut notices = Notices::new();

        let err = service.delete_entry(99, &mut notices).await.unwrap_err();

        match err {
            Error::Database(DatabaseError::NotFound(msg)) => {
                assert_eq!(msg, "Watchlist entry 99 not found")
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert_eq!(repo.tickers(), vec!["AAPL"]);
        assert!(notices.is_empty());
    }
}
