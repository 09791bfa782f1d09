//! Page view models rendered as JSON.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use tickerwatch_core::notices::{Notice, NoticeLevel};
use tickerwatch_core::quotes::StockQuote;
use tickerwatch_core::watchlist::WatchlistEntry;
use tickerwatch_market_data::PriceBar;

/// Form body shared by the home page lookup and the watchlist add.
#[derive(Deserialize, Debug, Default)]
pub struct TickerForm {
    pub ticker: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// One of `success`, `info`, `warning`, `error`
    pub level: String,
    pub message: String,
}

impl From<Notice> for Message {
    fn from(n: Notice) -> Self {
        let level = match n.level {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        Self {
            level: level.to_string(),
            message: n.message,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PriceBarView {
    pub date: NaiveDate,
    #[schema(value_type = f64)]
    pub open: Decimal,
    #[schema(value_type = f64)]
    pub high: Decimal,
    #[schema(value_type = f64)]
    pub low: Decimal,
    #[schema(value_type = f64)]
    pub close: Decimal,
    #[schema(value_type = f64)]
    pub adj_close: Decimal,
    pub volume: u64,
}

impl From<PriceBar> for PriceBarView {
    fn from(b: PriceBar) -> Self {
        Self {
            date: b.date,
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
            adj_close: b.adj_close,
            volume: b.volume,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StockQuoteView {
    pub symbol: String,
    pub company_name: String,
    pub data: Vec<PriceBarView>,
}

impl From<StockQuote> for StockQuoteView {
    fn from(q: StockQuote) -> Self {
        Self {
            symbol: q.symbol,
            company_name: q.company_name,
            data: q.data.into_iter().map(PriceBarView::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntryView {
    pub id: i32,
    pub ticker: String,
}

impl From<WatchlistEntry> for WatchlistEntryView {
    fn from(e: WatchlistEntry) -> Self {
        Self {
            id: e.id,
            ticker: e.ticker,
        }
    }
}

/// Home page. `companyName` is always present and null unless a fetch
/// completed; the other optional fields are omitted when unset.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<PriceBarView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub messages: Vec<Message>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AboutPage {
    pub title: String,
    pub description: String,
    pub messages: Vec<Message>,
}

/// Watchlist page: stored entries plus fresh quotes for each one that
/// could be fetched.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistPage {
    pub entries: Vec<WatchlistEntryView>,
    pub output: Vec<StockQuoteView>,
    pub messages: Vec<Message>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistListPage {
    pub entries: Vec<WatchlistEntryView>,
    pub messages: Vec<Message>,
}

pub fn messages(notices: impl IntoIterator<Item = Notice>) -> Vec<Message> {
    notices.into_iter().map(Message::from).collect()
}
