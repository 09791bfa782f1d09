//! Watchlist domain models.

use serde::{Deserialize, Serialize};

/// A stored ticker on the watchlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub id: i32,
    pub ticker: String,
}

/// Input model for adding a ticker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewWatchlistEntry {
    pub ticker: String,
}

/// Result of an add request. Every variant except `Added` leaves the store
/// untouched and has already pushed an error notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddTickerOutcome {
    Added(WatchlistEntry),
    InvalidForm,
    Duplicate { ticker: String },
    InvalidTicker { ticker: String },
}
