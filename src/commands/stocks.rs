// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::{CatalogFeed, StockCatalog};
use crate::favourites::Favourites;
use crate::filter::browse;
use crate::models::Stock;
use crate::store::Store;
use crate::utils::{fmt_change, fmt_change_percent, fmt_price, maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct StockRow {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub favourite: bool,
}

impl StockRow {
    pub fn new(stock: Stock, favourite: bool) -> Self {
        Self {
            symbol: stock.symbol,
            name: stock.name,
            price: stock.price,
            change: stock.change,
            change_percent: stock.change_percent,
            kind: stock.kind,
            favourite,
        }
    }
}

pub fn handle(store: &Store, catalog: &Arc<dyn StockCatalog>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let rows = query_rows(store, catalog, sub)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
                print_rows(rows);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Fetches the catalog while favourites are read, then applies `--search`.
pub fn query_rows(
    store: &Store,
    catalog: &Arc<dyn StockCatalog>,
    sub: &clap::ArgMatches,
) -> Result<Vec<StockRow>> {
    let feed = Arc::new(CatalogFeed::new());
    let pending = feed.refresh_in_background(Arc::clone(catalog));

    let favourites: HashSet<String> = Favourites::new(store)
        .list()?
        .into_iter()
        .map(|s| s.symbol)
        .collect();

    pending
        .join()
        .map_err(|_| anyhow!("Catalog fetch thread panicked"))??;
    let stocks = feed.stocks().unwrap_or_default();

    let search = sub.get_one::<String>("search").map(|s| s.as_str());
    Ok(browse(&stocks, search)
        .into_iter()
        .map(|s| {
            let fav = favourites.contains(&s.symbol);
            StockRow::new(s, fav)
        })
        .collect())
}

pub fn print_rows(rows: Vec<StockRow>) {
    println!("{}", stock_table(rows));
}

pub fn stock_table(rows: Vec<StockRow>) -> comfy_table::Table {
    let data = rows
        .into_iter()
        .map(|r| {
            vec![
                if r.favourite { "★".into() } else { String::new() },
                r.symbol,
                r.name,
                fmt_price(r.price),
                fmt_change(r.change),
                fmt_change_percent(r.change_percent),
            ]
        })
        .collect();
    pretty_table(&["", "Symbol", "Name", "Price", "Change", "Change %"], data)
}
