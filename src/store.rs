// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Embedded record store.
//!
//! A [`Store`] owns one SQLite connection holding the favourites and search
//! history collections plus the settings table. Reads go through
//! [`Store::read`]; every mutation goes through [`Store::write`], which wraps
//! the work in a transaction and commits it before returning. A failed commit
//! is reported to the caller and nothing from that write becomes visible.
//!
//! The per-collection modules ([`favourite_records`], [`history_records`],
//! [`settings_records`]) hold the typed insert/delete/query/count statements
//! and accept any `&Connection`, so they work both inside and outside a write.

use crate::db;
use crate::error::StoreError;
use rusqlite::{Connection, Transaction};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Disk(PathBuf),
    Memory,
}

pub struct Store {
    conn: Connection,
    location: Location,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::init(conn, Location::Disk(path.to_path_buf()))
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        Self::init(conn, Location::Memory)
    }

    /// Opens the on-disk store, degrading to an in-memory one if that fails.
    pub fn open_or_ephemeral(path: &Path) -> Result<Self, StoreError> {
        match Self::open(path) {
            Ok(store) => Ok(store),
            Err(err) => {
                warn!(error = %err, "falling back to an ephemeral in-memory store");
                Self::open_in_memory()
            }
        }
    }

    fn init(mut conn: Connection, location: Location) -> Result<Self, StoreError> {
        let version = db::migrate(&mut conn)?;
        debug!(?location, version, "store ready");
        Ok(Self { conn, location })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn is_ephemeral(&self) -> bool {
        self.location == Location::Memory
    }

    pub fn schema_version(&self) -> Result<i64, StoreError> {
        Ok(db::schema_version(&self.conn)?)
    }

    /// How long a write waits on another connection's lock before failing.
    pub fn set_busy_timeout(&self, timeout: Duration) -> Result<(), StoreError> {
        Ok(self.conn.busy_timeout(timeout)?)
    }

    pub fn read<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, StoreError> {
        Ok(f(&self.conn)?)
    }

    /// Runs `f` in a transaction and commits it. On error the transaction is
    /// rolled back and the error returned.
    pub fn write<T>(
        &self,
        f: impl FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
    ) -> Result<T, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let out = f(&tx)?;
        tx.commit().map_err(StoreError::Commit)?;
        Ok(out)
    }
}

pub mod favourite_records {
    use crate::models::FavouriteStock;
    use rusqlite::{Connection, OptionalExtension, Row, params};

    const COLUMNS: &str = "symbol, name, price, change, change_percent, logo, type";

    fn from_row(r: &Row<'_>) -> rusqlite::Result<FavouriteStock> {
        Ok(FavouriteStock {
            symbol: r.get(0)?,
            name: r.get(1)?,
            price: r.get(2)?,
            change: r.get(3)?,
            change_percent: r.get(4)?,
            logo: r.get(5)?,
            kind: r.get(6)?,
        })
    }

    /// Returns 0 when the symbol is already stored.
    pub fn insert(conn: &Connection, rec: &FavouriteStock) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT OR IGNORE INTO favourite_stocks(symbol, name, price, change, change_percent, logo, type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                rec.symbol,
                rec.name,
                rec.price,
                rec.change,
                rec.change_percent,
                rec.logo,
                rec.kind
            ],
        )
    }

    pub fn delete_by_symbol(conn: &Connection, symbol: &str) -> rusqlite::Result<usize> {
        conn.execute(
            "DELETE FROM favourite_stocks WHERE symbol=?1",
            params![symbol],
        )
    }

    pub fn count_by_symbol(conn: &Connection, symbol: &str) -> rusqlite::Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM favourite_stocks WHERE symbol=?1",
            params![symbol],
            |r| r.get(0),
        )
    }

    pub fn find(conn: &Connection, symbol: &str) -> rusqlite::Result<Option<FavouriteStock>> {
        let sql = format!("SELECT {COLUMNS} FROM favourite_stocks WHERE symbol=?1");
        conn.query_row(&sql, params![symbol], from_row).optional()
    }

    /// All favourites in insertion order.
    pub fn query_all(conn: &Connection) -> rusqlite::Result<Vec<FavouriteStock>> {
        let sql = format!("SELECT {COLUMNS} FROM favourite_stocks ORDER BY rowid");
        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt.query_map([], from_row)?;
        rows.collect()
    }
}

pub mod history_records {
    use crate::models::SearchHistoryEntry;
    use chrono::{DateTime, Utc};
    use rusqlite::{Connection, OptionalExtension, Row, params};

    fn from_row(r: &Row<'_>) -> rusqlite::Result<SearchHistoryEntry> {
        let query: String = r.get(0)?;
        let micros: i64 = r.get(1)?;
        let timestamp = DateTime::<Utc>::from_timestamp_micros(micros)
            .ok_or(rusqlite::Error::IntegralValueOutOfRange(1, micros))?;
        Ok(SearchHistoryEntry { query, timestamp })
    }

    pub fn insert(conn: &Connection, query: &str, micros: i64) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO search_history(query, date) VALUES (?1, ?2)",
            params![query, micros],
        )
    }

    /// Sets a new timestamp on an existing entry; returns rows touched.
    pub fn touch(conn: &Connection, query: &str, micros: i64) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE search_history SET date=?2 WHERE query=?1",
            params![query, micros],
        )
    }

    pub fn find(conn: &Connection, query: &str) -> rusqlite::Result<Option<SearchHistoryEntry>> {
        conn.query_row(
            "SELECT query, date FROM search_history WHERE query=?1",
            params![query],
            from_row,
        )
        .optional()
    }

    pub fn newest_micros(conn: &Connection) -> rusqlite::Result<Option<i64>> {
        conn.query_row("SELECT MAX(date) FROM search_history", [], |r| r.get(0))
    }

    pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
        conn.query_row("SELECT COUNT(*) FROM search_history", [], |r| r.get(0))
    }

    /// Most recent first, optionally capped.
    pub fn query_recent(
        conn: &Connection,
        limit: Option<usize>,
    ) -> rusqlite::Result<Vec<SearchHistoryEntry>> {
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let mut stmt = conn.prepare_cached(
            "SELECT query, date FROM search_history ORDER BY date DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], from_row)?;
        rows.collect()
    }

    /// Deletes every entry past the `keep` most recent ones.
    pub fn delete_beyond(conn: &Connection, keep: usize) -> rusqlite::Result<usize> {
        conn.execute(
            "DELETE FROM search_history WHERE query NOT IN (
                 SELECT query FROM search_history ORDER BY date DESC LIMIT ?1
             )",
            params![keep as i64],
        )
    }

    pub fn delete_all(conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute("DELETE FROM search_history", [])
    }
}

pub mod settings_records {
    use rusqlite::{Connection, OptionalExtension, params};

    pub fn get(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )
    }

    pub fn all(conn: &Connection) -> rusqlite::Result<Vec<(String, String)>> {
        let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key")?;
        let rows = stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?;
        rows.collect()
    }
}
