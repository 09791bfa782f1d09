use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use tickerwatch_core::watchlist::{NewWatchlistEntry, WatchlistEntry, WatchlistRepositoryTrait};
use tickerwatch_core::Result;

use super::model::{NewWatchlistEntryDB, WatchlistEntryDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::watchlist;
use crate::schema::watchlist::dsl::*;

pub struct WatchlistRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl WatchlistRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        WatchlistRepository { pool, writer }
    }
}

#[async_trait]
impl WatchlistRepositoryTrait for WatchlistRepository {
    /// Entries in insertion order.
    fn list_entries(&self) -> Result<Vec<WatchlistEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = watchlist
            .order(id.asc())
            .select(WatchlistEntryDB::as_select())
            .load::<WatchlistEntryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(WatchlistEntry::from).collect())
    }

    fn ticker_exists(&self, symbol: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let found = diesel::select(diesel::dsl::exists(
            watchlist.filter(ticker.eq(symbol)),
        ))
        .get_result::<bool>(&mut conn)
        .map_err(StorageError::from)?;
        Ok(found)
    }

    async fn insert_entry(&self, new_entry: NewWatchlistEntry) -> Result<WatchlistEntry> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<WatchlistEntry> {
                let new_entry_db: NewWatchlistEntryDB = new_entry.into();
                let row = diesel::insert_into(watchlist::table)
                    .values(&new_entry_db)
                    .returning(WatchlistEntryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(WatchlistEntry::from(row))
            })
            .await
    }

    async fn delete_entry(&self, entry_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(watchlist.find(entry_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
