//! Yahoo Finance market data provider.
//!
//! Daily bars come from the chart endpoint through `yahoo_finance_api`.
//! Company names come from the `quoteSummary` endpoint, which needs a
//! cookie/crumb pair, with ticker search as a fallback.

mod models;

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use lazy_static::lazy_static;
use num_traits::FromPrimitive;
use reqwest::header;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{normalize_bars, AssetProfile, HistoryRequest, PriceBar};
use crate::provider::MarketDataProvider;

use models::{YahooQuoteSummaryResponse, YahooQuoteSummaryResult};

const PROVIDER_ID: &str = "YAHOO";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Trading days kept from a history response.
const MAX_BARS: usize = 5;

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

lazy_static! {
    /// Global cache for Yahoo authentication crumb
    static ref YAHOO_CRUMB: RwLock<Option<CrumbData>> = RwLock::default();
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: reqwest::Client,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            MarketDataError::provider(
                PROVIDER_ID,
                format!("Failed to initialize Yahoo connector: {}", e),
            )
        })?;
        Ok(Self {
            connector,
            client: reqwest::Client::new(),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        let cached = YAHOO_CRUMB.read().ok().and_then(|guard| guard.clone());
        if let Some(crumb) = cached {
            return Ok(crumb);
        }
        self.fetch_crumb().await
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get("https://fc.yahoo.com")
            .send()
            .await?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| MarketDataError::provider(PROVIDER_ID, "Failed to parse Yahoo cookie"))?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await?
            .text()
            .await
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, format!("Failed to read crumb: {}", e)))?;

        let crumb_data = CrumbData { cookie, crumb };
        if let Ok(mut guard) = YAHOO_CRUMB.write() {
            *guard = Some(crumb_data.clone());
        }

        Ok(crumb_data)
    }

    /// Clear the cached crumb (used when authentication fails)
    fn clear_crumb(&self) {
        if let Ok(mut guard) = YAHOO_CRUMB.write() {
            *guard = None;
        }
    }

    // ========================================================================
    // Profile Fetching
    // ========================================================================

    /// Fetch profile using the quoteSummary `price` module.
    async fn fetch_quote_summary_profile(
        &self,
        symbol: &str,
    ) -> Result<AssetProfile, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules=price&crumb={}",
            encode(symbol),
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_crumb();
            return Err(MarketDataError::provider(
                PROVIDER_ID,
                "Yahoo authentication expired",
            ));
        }

        let data: YahooQuoteSummaryResponse = response.json().await.map_err(|e| {
            MarketDataError::provider(
                PROVIDER_ID,
                format!("Failed to parse profile response: {}", e),
            )
        })?;

        let result = data
            .quote_summary
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(map_quote_summary_to_profile(&result))
    }

    /// Fetch profile using search (last resort, minimal data).
    async fn fetch_search_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        let result = self
            .connector
            .search_ticker(&encode(symbol))
            .await
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, e.to_string()))?;

        let item = result
            .quotes
            .iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Ok(AssetProfile {
            source: Some(PROVIDER_ID.to_string()),
            name: Some(item.long_name.as_str())
                .filter(|name| !name.trim().is_empty())
                .map(format_name),
            short_name: Some(item.short_name.clone()),
            quote_type: Some(item.quote_type.to_uppercase()),
            ..Default::default()
        })
    }
}

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_price_history(
        &self,
        symbol: &str,
        request: &HistoryRequest,
    ) -> Result<Vec<PriceBar>, MarketDataError> {
        debug!(
            "Fetching {} bars over {} for {} from Yahoo",
            request.interval, request.range, symbol
        );

        let response = self
            .connector
            .get_quote_range(symbol, request.interval, request.range)
            .await
            .map_err(|e| map_yahoo_error(symbol, e))?;

        let yahoo_quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(yahoo::YahooError::NoQuotes) => {
                warn!("No quotes returned for '{}' over {}", symbol, request.range);
                return Ok(Vec::new());
            }
            Err(e) => return Err(map_yahoo_error(symbol, e)),
        };
        let offset = exchange_offset(symbol, &response);

        let bars = yahoo_quotes
            .into_iter()
            .filter_map(|q| {
                match bar_from_parts(
                    q.timestamp as i64,
                    offset,
                    q.open,
                    q.high,
                    q.low,
                    q.close,
                    q.adjclose,
                    q.volume,
                ) {
                    Ok(bar) => Some(bar),
                    Err(e) => {
                        warn!("Skipping bar for {} due to conversion error: {}", symbol, e);
                        None
                    }
                }
            })
            .collect();

        Ok(normalize_bars(bars, MAX_BARS))
    }

    async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        debug!("Fetching profile for {} from Yahoo", symbol);

        match self.fetch_quote_summary_profile(symbol).await {
            Ok(profile) => return Ok(profile),
            Err(e) => {
                debug!(
                    "quoteSummary failed for {}: {}, trying search fallback",
                    symbol, e
                );
            }
        }

        self.fetch_search_profile(symbol).await
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn map_yahoo_error(symbol: &str, error: yahoo::YahooError) -> MarketDataError {
    if matches!(error, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
        MarketDataError::SymbolNotFound(symbol.to_string())
    } else {
        MarketDataError::provider(PROVIDER_ID, error.to_string())
    }
}

/// UTC offset of the exchange listing `symbol`, from the chart metadata.
fn exchange_offset(symbol: &str, response: &yahoo::YResponse) -> FixedOffset {
    let offset = response
        .metadata()
        .ok()
        .and_then(|meta| i32::try_from(meta.gmtoffset).ok())
        .and_then(FixedOffset::east_opt);
    offset.unwrap_or_else(|| {
        warn!("No exchange offset for {}, dating bars in UTC", symbol);
        Utc.fix()
    })
}

/// Build a [`PriceBar`] from the raw chart row values.
///
/// Rows are timestamped at the session open; `offset` puts that instant on
/// the exchange's calendar. Yahoo reports missing values as NaN, which
/// `Decimal` rejects; such rows are reported as validation failures so the
/// caller can skip them.
#[allow(clippy::too_many_arguments)]
fn bar_from_parts(
    timestamp: i64,
    offset: FixedOffset,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    adj_close: f64,
    volume: u64,
) -> Result<PriceBar, MarketDataError> {
    let date: NaiveDate = offset
        .timestamp_opt(timestamp, 0)
        .single()
        .ok_or_else(|| MarketDataError::ValidationFailed {
            message: format!("Invalid timestamp: {}", timestamp),
        })?
        .date_naive();

    let price = |label: &str, value: f64| {
        Decimal::from_f64(value).ok_or_else(|| MarketDataError::ValidationFailed {
            message: format!("Failed to convert {} price {} to Decimal", label, value),
        })
    };

    Ok(PriceBar {
        date,
        open: price("open", open)?,
        high: price("high", high)?,
        low: price("low", low)?,
        close: price("close", close)?,
        adj_close: price("adjusted close", adj_close)?,
        volume,
    })
}

/// Map quoteSummary result to AssetProfile.
fn map_quote_summary_to_profile(result: &YahooQuoteSummaryResult) -> AssetProfile {
    let price = result.price.as_ref();

    let long_name = price
        .and_then(|p| p.long_name.as_deref())
        .filter(|name| !name.trim().is_empty());

    AssetProfile {
        source: Some(PROVIDER_ID.to_string()),
        // Only a real long name counts; callers substitute their own
        // placeholder rather than a symbol echo.
        name: long_name.map(format_name),
        short_name: price.and_then(|p| p.short_name.clone()),
        quote_type: price
            .and_then(|p| p.quote_type.clone())
            .map(|t| t.to_uppercase()),
        currency: price.and_then(|p| p.currency.clone()),
    }
}

/// Clean up fund names by removing common prefixes.
fn format_name(long_name: &str) -> String {
    let replacements = [
        ("&amp;", "&"),
        ("iShares VII PLC - ", ""),
        ("Vanguard Index Funds - ", ""),
        ("Xtrackers (IE) Plc - ", ""),
    ];

    replacements
        .iter()
        .fold(long_name.to_string(), |name, (from, to)| name.replace(from, to))
}
