//! Tickerwatch Core - Domain entities, services, and traits.
//!
//! This crate contains the quote lookup and watchlist logic. It is
//! database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod notices;
pub mod quotes;
pub mod watchlist;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
