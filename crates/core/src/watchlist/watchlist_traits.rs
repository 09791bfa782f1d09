use async_trait::async_trait;

use crate::errors::Result;
use crate::notices::Notices;
use crate::quotes::StockQuote;
use crate::watchlist::watchlist_model::{AddTickerOutcome, NewWatchlistEntry, WatchlistEntry};

/// Trait for watchlist repository operations
#[async_trait]
pub trait WatchlistRepositoryTrait: Send + Sync {
    fn list_entries(&self) -> Result<Vec<WatchlistEntry>>;
    fn ticker_exists(&self, ticker: &str) -> Result<bool>;
    async fn insert_entry(&self, new_entry: NewWatchlistEntry) -> Result<WatchlistEntry>;
    /// Returns the number of rows removed (0 or 1).
    async fn delete_entry(&self, entry_id: i32) -> Result<usize>;
}

/// Trait for watchlist service operations
#[async_trait]
pub trait WatchlistServiceTrait: Send + Sync {
    fn list_entries(&self) -> Result<Vec<WatchlistEntry>>;
    async fn refresh(&self, notices: &mut Notices) -> Result<Vec<StockQuote>>;
    async fn add_ticker(
        &self,
        ticker: Option<&str>,
        notices: &mut Notices,
    ) -> Result<AddTickerOutcome>;
    async fn delete_entry(&self, entry_id: i32, notices: &mut Notices) -> Result<()>;
}
