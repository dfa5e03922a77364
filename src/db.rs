// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;
use tracing::info;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Stockshelf", "stockshelf"));

/// Ordered schema steps; entry `i` upgrades the store to version `i + 1`.
const MIGRATIONS: &[&str] = &[r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS favourite_stocks(
        symbol TEXT PRIMARY KEY NOT NULL,
        name TEXT,
        price REAL NOT NULL DEFAULT 0,
        change REAL NOT NULL DEFAULT 0,
        change_percent REAL NOT NULL DEFAULT 0,
        logo TEXT,
        type TEXT
    );

    -- date: UTC microseconds, strictly increasing per store
    CREATE TABLE IF NOT EXISTS search_history(
        query TEXT PRIMARY KEY NOT NULL,
        date INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_search_history_date ON search_history(date);
    "#];

pub const SCHEMA_VERSION: i64 = MIGRATIONS.len() as i64;

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("stockshelf.sqlite"))
}

pub fn schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.pragma_query_value(None, "user_version", |r| r.get(0))
}

pub fn migrate(conn: &mut Connection) -> Result<i64, StoreError> {
    let current = schema_version(conn)?;
    for (idx, sql) in MIGRATIONS.iter().enumerate() {
        let version = idx as i64 + 1;
        if version <= current {
            continue;
        }
        let wrap = |source: rusqlite::Error| StoreError::Migrate { version, source };
        let tx = conn.transaction().map_err(wrap)?;
        tx.execute_batch(sql).map_err(wrap)?;
        tx.pragma_update(None, "user_version", version)
            .map_err(wrap)?;
        tx.commit().map_err(wrap)?;
        info!(version, "applied schema migration");
    }
    Ok(SCHEMA_VERSION.max(current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrate_sets_user_version_and_is_repeatable() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);
        assert_eq!(migrate(&mut conn).unwrap(), SCHEMA_VERSION);
        assert_eq!(migrate(&mut conn).unwrap(), SCHEMA_VERSION);
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('settings','favourite_stocks','search_history')",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(tables, 3);
    }
}
