//! Market data models
//!
//! - `types` - Request constants
//! - `price_bar` - Daily OHLCV rows (PriceBar) and the history request (HistoryRequest)
//! - `profile` - Asset profile data (AssetProfile)

mod price_bar;
mod profile;
mod types;

pub use price_bar::{normalize_bars, HistoryRequest, PriceBar};
pub use profile::AssetProfile;
pub use types::{DAILY_INTERVAL, RECENT_RANGE};
