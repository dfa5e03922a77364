// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::{StockCatalog, find_by_symbol};
use crate::commands::stocks::{StockRow, print_rows};
use crate::favourites::Favourites;
use crate::filter::browse;
use crate::models::Stock;
use crate::store::Store;
use crate::utils::maybe_print_json;
use anyhow::{Context, Result, anyhow};

pub fn handle(store: &Store, catalog: &dyn StockCatalog, m: &clap::ArgMatches) -> Result<()> {
    let favs = Favourites::new(store);
    match m.subcommand() {
        Some(("add", sub)) => {
            let stock = lookup(catalog, symbol(sub))?;
            if favs.save(&stock)? {
                println!("Added {} ({}) to favourites", stock.symbol, stock.name);
            } else {
                println!("{} is already a favourite", stock.symbol);
            }
        }
        Some(("rm", sub)) => {
            let sym = resolve_symbol(&favs, symbol(sub))?;
            if favs.delete(&sym)? > 0 {
                println!("Removed {} from favourites", sym);
            } else {
                println!("{} was not a favourite", sym);
            }
        }
        Some(("toggle", sub)) => {
            let sym = resolve_symbol(&favs, symbol(sub))?;
            let stock = match favs.get(&sym)? {
                Some(s) => s,
                None => lookup(catalog, &sym)?,
            };
            if favs.toggle(&stock)? {
                println!("★ {}", stock.symbol);
            } else {
                println!("☆ {}", stock.symbol);
            }
        }
        Some(("check", sub)) => {
            let sym = resolve_symbol(&favs, symbol(sub))?;
            println!("{}", favs.is_favourite(&sym)?);
        }
        Some(("list", sub)) => {
            let rows = list_rows(store, sub)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
                print_rows(rows);
            }
        }
        _ => {}
    }
    Ok(())
}

fn symbol(sub: &clap::ArgMatches) -> &str {
    sub.get_one::<String>("symbol").unwrap().trim()
}

/// Maps user input onto the stored spelling of a favourite, if there is one.
fn resolve_symbol(favs: &Favourites<'_>, raw: &str) -> Result<String> {
    let stored = favs.list()?;
    Ok(find_by_symbol(&stored, raw)
        .map(|s| s.symbol.clone())
        .unwrap_or_else(|| raw.to_uppercase()))
}

fn lookup(catalog: &dyn StockCatalog, raw: &str) -> Result<Stock> {
    let stocks = catalog.fetch_stocks().context("Failed to load catalog")?;
    find_by_symbol(&stocks, raw)
        .cloned()
        .ok_or_else(|| anyhow!("Stock '{}' not found in catalog", raw))
}

pub fn list_rows(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<StockRow>> {
    let favs = Favourites::new(store).list()?;
    let search = sub.get_one::<String>("search").map(|s| s.as_str());
    Ok(browse(&favs, search)
        .into_iter()
        .map(|s| StockRow::new(s, true))
        .collect())
}
