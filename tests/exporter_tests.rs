// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use stockshelf::catalog::decode_stocks;
use stockshelf::cli;
use stockshelf::commands::exporter;
use stockshelf::favourites::Favourites;
use stockshelf::models::Stock;
use stockshelf::store::Store;
use tempfile::tempdir;

fn setup() -> Store {
    let store = Store::open_in_memory().unwrap();
    let favs = Favourites::new(&store);
    for (sym, name, kind) in [("AAPL", "Apple", "stock"), ("SPY", "S&P, 500", "etf")] {
        favs.save(&Stock {
            symbol: sym.into(),
            name: name.into(),
            price: 12.5,
            change: -0.25,
            change_percent: -2.0,
            logo: format!("https://logo/{}.png", sym),
            kind: kind.into(),
        })
        .unwrap();
    }
    store
}

#[test]
fn csv_export_writes_header_and_rows() {
    let store = setup();
    let dir = tempdir().unwrap();
    let out = dir.path().join("favs.csv");
    let out_s = out.to_str().unwrap();
    let matches = cli::build_cli().get_matches_from([
        "stockshelf",
        "export",
        "favourites",
        "--out",
        out_s,
    ]);
    let (_, export_m) = matches.subcommand().unwrap();
    exporter::handle(&store, export_m).unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "symbol");
    assert_eq!(&headers[6], "type");
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[1][1], "S&P, 500");
    assert_eq!(&records[1][6], "etf");
}

#[test]
fn json_export_reads_back_as_catalog() {
    let store = setup();
    let dir = tempdir().unwrap();
    let out = dir.path().join("favs.json");
    let n = exporter::export_favourites(&store, "json", &out).unwrap();
    assert_eq!(n, 2);
    let body = std::fs::read(&out).unwrap();
    let back = decode_stocks(&body).unwrap();
    assert_eq!(back, Favourites::new(&store).list().unwrap());
}

#[test]
fn unknown_format_is_an_error() {
    let store = setup();
    let dir = tempdir().unwrap();
    let out = dir.path().join("favs.xml");
    let err = exporter::export_favourites(&store, "xml", &out).unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out.exists());
}
