//! Database models for the watchlist.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use tickerwatch_core::watchlist::{NewWatchlistEntry, WatchlistEntry};

/// Database model for a watchlist row
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::watchlist)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntryDB {
    pub id: i32,
    pub ticker: String,
}

/// Database model for inserting a ticker; the id is assigned by SQLite
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::watchlist)]
#[serde(rename_all = "camelCase")]
pub struct NewWatchlistEntryDB {
    pub ticker: String,
}

impl From<WatchlistEntryDB> for WatchlistEntry {
    fn from(db: WatchlistEntryDB) -> Self {
        Self {
            id: db.id,
            ticker: db.ticker,
        }
    }
}

impl From<NewWatchlistEntry> for NewWatchlistEntryDB {
    fn from(domain: NewWatchlistEntry) -> Self {
        Self {
            ticker: domain.ticker,
        }
    }
}
