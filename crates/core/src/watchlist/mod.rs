//! Watchlist module - domain models, services, and traits.

mod watchlist_model;
mod watchlist_service;
mod watchlist_traits;

pub use watchlist_model::{AddTickerOutcome, NewWatchlistEntry, WatchlistEntry};
pub use watchlist_service::WatchlistService;
pub use watchlist_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};
