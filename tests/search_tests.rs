// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;
use stockshelf::catalog::StockCatalog;
use stockshelf::cli;
use stockshelf::commands::{search, stocks};
use stockshelf::config::Config;
use stockshelf::error::CatalogError;
use stockshelf::favourites::Favourites;
use stockshelf::history::SearchHistory;
use stockshelf::models::Stock;
use stockshelf::store::Store;

struct FakeCatalog(Vec<Stock>);

impl StockCatalog for FakeCatalog {
    fn fetch_stocks(&self) -> Result<Vec<Stock>, CatalogError> {
        Ok(self.0.clone())
    }
}

struct DownCatalog;

impl StockCatalog for DownCatalog {
    fn fetch_stocks(&self) -> Result<Vec<Stock>, CatalogError> {
        Err(CatalogError::Status {
            url: "http://down".into(),
            status: 502,
        })
    }
}

fn stock(symbol: &str, name: &str, kind: &str) -> Stock {
    Stock {
        symbol: symbol.into(),
        name: name.into(),
        price: 100.0,
        change: 1.0,
        change_percent: 1.0,
        logo: String::new(),
        kind: kind.into(),
    }
}

fn catalog() -> FakeCatalog {
    FakeCatalog(vec![
        stock("FSLR", "First Solar", "stock"),
        stock("AAPL", "Apple", "stock"),
        stock("TAN", "Invesco Solar ETF", "etf"),
    ])
}

fn search_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["stockshelf", "search"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("search", m)) => m.clone(),
        _ => panic!("search command not parsed"),
    }
}

fn symbols(v: &[Stock]) -> Vec<&str> {
    v.iter().map(|s| s.symbol.as_str()).collect()
}

#[test]
fn search_records_history_and_keeps_only_stocks() {
    let store = Store::open_in_memory().unwrap();
    let cfg = Config::default();
    let hits = search::run(&store, &cfg, &catalog(), &search_matches(&["solar"])).unwrap();
    assert_eq!(symbols(&hits), vec!["FSLR"]);
    assert_eq!(SearchHistory::new(&store).recent(1).unwrap(), vec!["solar"]);
}

#[test]
fn all_types_includes_other_instruments() {
    let store = Store::open_in_memory().unwrap();
    let cfg = Config::default();
    let m = search_matches(&["SOLAR", "--all-types"]);
    let hits = search::run(&store, &cfg, &catalog(), &m).unwrap();
    assert_eq!(symbols(&hits), vec!["FSLR", "TAN"]);
}

#[test]
fn multi_word_query_is_one_history_entry() {
    let store = Store::open_in_memory().unwrap();
    let cfg = Config::default();
    search::run(&store, &cfg, &catalog(), &search_matches(&["first", "solar"])).unwrap();
    search::run(&store, &cfg, &catalog(), &search_matches(&["apple"])).unwrap();
    search::run(&store, &cfg, &catalog(), &search_matches(&["first", "solar"])).unwrap();
    assert_eq!(
        SearchHistory::new(&store).recent(20).unwrap(),
        vec!["first solar", "apple"]
    );
}

#[test]
fn configured_history_limit_applies() {
    let store = Store::open_in_memory().unwrap();
    let cfg = Config {
        history_limit: 2,
        ..Config::default()
    };
    for q in ["a", "b", "c"] {
        search::run(&store, &cfg, &catalog(), &search_matches(&[q])).unwrap();
    }
    assert_eq!(SearchHistory::new(&store).recent(20).unwrap(), vec!["c", "b"]);
}

#[test]
fn catalog_failure_still_records_query() {
    let store = Store::open_in_memory().unwrap();
    let cfg = Config::default();
    let err = search::run(&store, &cfg, &DownCatalog, &search_matches(&["nokia"])).unwrap_err();
    assert!(format!("{:#}", err).contains("502"));
    assert_eq!(SearchHistory::new(&store).recent(1).unwrap(), vec!["nokia"]);
}

#[test]
fn stocks_list_marks_favourites_and_filters() {
    let store = Store::open_in_memory().unwrap();
    Favourites::new(&store)
        .save(&stock("AAPL", "Apple", "stock"))
        .unwrap();
    let catalog: Arc<dyn StockCatalog> = Arc::new(catalog());

    let matches = cli::build_cli().get_matches_from(["stockshelf", "stocks", "list"]);
    let (_, stocks_m) = matches.subcommand().unwrap();
    let (_, list_m) = stocks_m.subcommand().unwrap();
    let rows = stocks::query_rows(&store, &catalog, list_m).unwrap();
    assert_eq!(rows.len(), 3);
    let favs: Vec<&str> = rows
        .iter()
        .filter(|r| r.favourite)
        .map(|r| r.symbol.as_str())
        .collect();
    assert_eq!(favs, vec!["AAPL"]);

    let matches =
        cli::build_cli().get_matches_from(["stockshelf", "stocks", "list", "--search", "sol"]);
    let (_, stocks_m) = matches.subcommand().unwrap();
    let (_, list_m) = stocks_m.subcommand().unwrap();
    let rows = stocks::query_rows(&store, &catalog, list_m).unwrap();
    let syms: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(syms, vec!["FSLR", "TAN"]);
}

#[test]
fn stocks_list_surfaces_catalog_errors() {
    let store = Store::open_in_memory().unwrap();
    let catalog: Arc<dyn StockCatalog> = Arc::new(DownCatalog);
    let matches = cli::build_cli().get_matches_from(["stockshelf", "stocks", "list"]);
    let (_, stocks_m) = matches.subcommand().unwrap();
    let (_, list_m) = stocks_m.subcommand().unwrap();
    assert!(stocks::query_rows(&store, &catalog, list_m).is_err());
}

#[test]
fn stock_table_shows_absolute_and_percent_change() {
    let mut yndx = stock("YNDX", "Yandex, LLC", "stock");
    yndx.price = 4764.6;
    yndx.change = 55.75;
    yndx.change_percent = -1.25;
    let table = stocks::stock_table(vec![stocks::StockRow::new(yndx, true)]).to_string();
    assert!(table.contains("Change %"));
    assert!(table.contains("$4764.60"));
    assert!(table.contains("+55.75"));
    assert!(table.contains("-1.25%"));
    assert!(table.contains("★"));
}
