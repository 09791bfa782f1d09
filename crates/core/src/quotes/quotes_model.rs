//! Quote domain models.

use serde::{Deserialize, Serialize};

use tickerwatch_market_data::{MarketDataError, PriceBar};

/// Recent price history for one ticker, with its display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    pub company_name: String,
    /// Daily bars, oldest first
    pub data: Vec<PriceBar>,
}

/// Outcome of a gateway fetch. The error's `Display` is shown to users.
pub type QuoteResult = std::result::Result<StockQuote, MarketDataError>;

/// What the home page shows after a lookup request.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteLookup {
    /// Nothing submitted yet; show the prompt.
    Prompt { ticker_message: String },

    /// Submitted ticker was missing or blank. Nothing was fetched.
    EmptyTicker,

    /// The fetch failed; `error` is the full inline message.
    Failed { ticker: String, error: String },

    /// The fetch succeeded.
    Found { ticker: String, quote: StockQuote },
}

impl QuoteLookup {
    /// The company name, present only when the fetch completed.
    pub fn company_name(&self) -> Option<&str> {
        match self {
            QuoteLookup::Found { quote, .. } => Some(quote.company_name.as_str()),
            _ => None,
        }
    }
}
