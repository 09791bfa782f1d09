use async_trait::async_trait;

use crate::notices::Notices;
use crate::quotes::quotes_model::{QuoteLookup, QuoteResult};

/// Fetches recent price history and a display name for a ticker.
#[async_trait]
pub trait QuoteGatewayTrait: Send + Sync {
    /// `symbol` must already be trimmed and non-empty.
    async fn fetch(&self, symbol: &str) -> QuoteResult;
}

/// Home page lookup flow.
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Initial page state, before anything is submitted.
    fn prompt(&self) -> QuoteLookup;

    /// Look up a submitted ticker. Validation failures are pushed to `notices`.
    async fn lookup(&self, ticker: Option<&str>, notices: &mut Notices) -> QuoteLookup;
}
