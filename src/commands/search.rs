// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::StockCatalog;
use crate::commands::stocks::{StockRow, print_rows};
use crate::config::Config;
use crate::favourites::Favourites;
use crate::filter::{filter_stocks, only_kind};
use crate::history::SearchHistory;
use crate::models::Stock;
use crate::store::Store;
use crate::utils::maybe_print_json;
use anyhow::{Context, Result};

pub fn handle(
    store: &Store,
    cfg: &Config,
    catalog: &dyn StockCatalog,
    m: &clap::ArgMatches,
) -> Result<()> {
    let hits = run(store, cfg, catalog, m)?;
    let favs = Favourites::new(store);
    let mut rows = Vec::with_capacity(hits.len());
    for s in hits {
        let fav = favs.is_favourite(&s.symbol)?;
        rows.push(StockRow::new(s, fav));
    }
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    if rows.is_empty() {
        println!("No stocks match.");
    } else {
        print_rows(rows);
    }
    Ok(())
}

/// Records the query, then returns matching stocks from a fresh catalog.
pub fn run(
    store: &Store,
    cfg: &Config,
    catalog: &dyn StockCatalog,
    m: &clap::ArgMatches,
) -> Result<Vec<Stock>> {
    let query = m
        .get_many::<String>("query")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default();

    SearchHistory::with_limit(store, cfg.history_limit)
        .save(&query)
        .context("Failed to record search")?;

    let stocks = catalog.fetch_stocks().context("Failed to load catalog")?;
    let hits = filter_stocks(&stocks, query.trim());
    if m.get_flag("all_types") {
        Ok(hits)
    } else {
        Ok(only_kind(hits, Stock::DEFAULT_KIND))
    }
}
