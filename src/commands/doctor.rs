// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::db::SCHEMA_VERSION;
use crate::store::{Store, history_records};
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(store: &Store, cfg: &Config) -> Result<()> {
    let rows = diagnose(store, cfg)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn diagnose(store: &Store, cfg: &Config) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    if store.is_ephemeral() {
        rows.push(vec![
            "ephemeral_store".into(),
            "changes will be lost on exit".into(),
        ]);
    }

    let version = store.schema_version()?;
    if version != SCHEMA_VERSION {
        rows.push(vec![
            "schema_version".into(),
            format!("found {}, expected {}", version, SCHEMA_VERSION),
        ]);
    }

    // 1) Favourites saved without the fields the list view needs
    let incomplete = store.read(|c| {
        let mut stmt = c.prepare(
            "SELECT symbol FROM favourite_stocks
             WHERE COALESCE(name,'')='' OR COALESCE(logo,'')='' OR COALESCE(type,'')=''
             ORDER BY symbol",
        )?;
        let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
    })?;
    for sym in incomplete {
        rows.push(vec!["favourite_missing_fields".into(), sym]);
    }

    // 2) History larger than the configured cap (e.g. after lowering history_limit)
    let count = store.read(history_records::count)?;
    if count as usize > cfg.history_limit {
        rows.push(vec![
            "history_over_limit".into(),
            format!("{} entries, limit {}", count, cfg.history_limit),
        ]);
    }

    Ok(rows)
}
