use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{DAILY_INTERVAL, RECENT_RANGE};

/// One trading day of price data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBar {
    /// Trading day on the exchange's own calendar
    pub date: NaiveDate,

    /// Opening price
    pub open: Decimal,

    /// Session high
    pub high: Decimal,

    /// Session low
    pub low: Decimal,

    /// Closing price
    pub close: Decimal,

    /// Close adjusted for splits and dividends
    pub adj_close: Decimal,

    /// Shares traded
    pub volume: u64,
}

/// Window of history to request from a provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRequest {
    /// Bar interval, e.g. "1d"
    pub interval: &'static str,

    /// Lookback range, e.g. "5d"
    pub range: &'static str,
}

impl HistoryRequest {
    /// Daily bars for the last five trading days.
    pub const fn recent() -> Self {
        Self {
            interval: DAILY_INTERVAL,
            range: RECENT_RANGE,
        }
    }
}

impl Default for HistoryRequest {
    fn default() -> Self {
        Self::recent()
    }
}

/// Sort bars by date ascending and keep only the most recent `limit` days.
///
/// Providers occasionally return an extra intraday row for the current
/// session, or rows out of order; this normalizes both. When two rows share
/// a date the later one wins, since the live row is appended last.
pub fn normalize_bars(mut bars: Vec<PriceBar>, limit: usize) -> Vec<PriceBar> {
    bars.sort_by_key(|bar| bar.date);
    bars.reverse();
    bars.dedup_by_key(|bar| bar.date);
    bars.reverse();
    if bars.len() > limit {
        bars.drain(..bars.len() - limit);
    }
    bars
}
