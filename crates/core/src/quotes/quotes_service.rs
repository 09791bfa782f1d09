use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::quotes_model::QuoteLookup;
use super::quotes_traits::{QuoteGatewayTrait, QuoteServiceTrait};
use crate::constants::{EMPTY_TICKER_MESSAGE, TICKER_PROMPT};
use crate::notices::Notices;

/// Service behind the home page lookup.
pub struct QuoteService {
    gateway: Arc<dyn QuoteGatewayTrait>,
}

impl QuoteService {
    pub fn new(gateway: Arc<dyn QuoteGatewayTrait>) -> Self {
        QuoteService { gateway }
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    fn prompt(&self) -> QuoteLookup {
        QuoteLookup::Prompt {
            ticker_message: TICKER_PROMPT.to_string(),
        }
    }

    async fn lookup(&self, ticker: Option<&str>, notices: &mut Notices) -> QuoteLookup {
        let ticker = ticker.map(str::trim).unwrap_or_default();
        if ticker.is_empty() {
            notices.error(EMPTY_TICKER_MESSAGE);
            return QuoteLookup::EmptyTicker;
        }

        debug!("Looking up quote for {}", ticker);
        match self.gateway.fetch(ticker).await {
            Ok(quote) => QuoteLookup::Found {
                ticker: ticker.to_string(),
                quote,
            },
            Err(e) => QuoteLookup::Failed {
                ticker: ticker.to_string(),
                error: format!("Error occurred: {}", e),
            },
        }
    }
}
