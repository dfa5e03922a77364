// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreError;
use crate::models::{FavouriteStock, Stock};
use crate::store::{Store, favourite_records};
use tracing::info;

/// Favourite stocks, read straight from the store on every call.
pub struct Favourites<'a> {
    store: &'a Store,
}

impl<'a> Favourites<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn is_favourite(&self, symbol: &str) -> Result<bool, StoreError> {
        let n = self
            .store
            .read(|c| favourite_records::count_by_symbol(c, symbol))?;
        Ok(n > 0)
    }

    /// Returns `false` when the stock was already a favourite.
    pub fn save(&self, stock: &Stock) -> Result<bool, StoreError> {
        if self.is_favourite(&stock.symbol)? {
            return Ok(false);
        }
        let rec = FavouriteStock::from(stock);
        let inserted = self.store.write(|tx| favourite_records::insert(tx, &rec))?;
        if inserted > 0 {
            info!(symbol = %stock.symbol, "saved favourite");
        }
        Ok(inserted > 0)
    }

    /// Returns the number of removed rows; 0 if the symbol was never saved.
    pub fn delete(&self, symbol: &str) -> Result<usize, StoreError> {
        if !self.is_favourite(symbol)? {
            return Ok(0);
        }
        let removed = self
            .store
            .write(|tx| favourite_records::delete_by_symbol(tx, symbol))?;
        info!(symbol, removed, "deleted favourite");
        Ok(removed)
    }

    /// Flips membership and returns whether the stock is now a favourite.
    pub fn toggle(&self, stock: &Stock) -> Result<bool, StoreError> {
        if self.is_favourite(&stock.symbol)? {
            self.delete(&stock.symbol)?;
            Ok(false)
        } else {
            self.save(stock)?;
            Ok(true)
        }
    }

    pub fn get(&self, symbol: &str) -> Result<Option<Stock>, StoreError> {
        let rec = self.store.read(|c| favourite_records::find(c, symbol))?;
        Ok(rec.map(Stock::from))
    }

    /// Every favourite, in the order it was added.
    pub fn list(&self) -> Result<Vec<Stock>, StoreError> {
        let recs = self.store.read(favourite_records::query_all)?;
        Ok(recs.into_iter().map(Stock::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(symbol: &str, name: &str) -> Stock {
        Stock {
            symbol: symbol.into(),
            name: name.into(),
            price: 100.0,
            change: -1.5,
            change_percent: -1.48,
            logo: format!("https://logo/{symbol}.png"),
            kind: Stock::DEFAULT_KIND.into(),
        }
    }

    #[test]
    fn save_then_check_then_delete() {
        let store = Store::open_in_memory().unwrap();
        let favs = Favourites::new(&store);
        let s = stock("AAPL", "Apple");
        assert!(!favs.is_favourite("AAPL").unwrap());
        assert!(favs.save(&s).unwrap());
        assert!(favs.is_favourite("AAPL").unwrap());
        assert_eq!(favs.delete("AAPL").unwrap(), 1);
        assert!(!favs.is_favourite("AAPL").unwrap());
    }

    #[test]
    fn save_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        let favs = Favourites::new(&store);
        let s = stock("TSLA", "Tesla");
        assert!(favs.save(&s).unwrap());
        assert!(!favs.save(&s).unwrap());
        let n = store
            .read(|c| favourite_records::count_by_symbol(c, "TSLA"))
            .unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn delete_unknown_symbol_is_noop() {
        let store = Store::open_in_memory().unwrap();
        let favs = Favourites::new(&store);
        assert_eq!(favs.delete("NOPE").unwrap(), 0);
        assert!(!favs.is_favourite("NOPE").unwrap());
    }

    #[test]
    fn list_returns_live_set_without_duplicates() {
        let store = Store::open_in_memory().unwrap();
        let favs = Favourites::new(&store);
        for (sym, name) in [("AAPL", "Apple"), ("MSFT", "Microsoft"), ("AMZN", "Amazon")] {
            favs.save(&stock(sym, name)).unwrap();
        }
        favs.save(&stock("AAPL", "Apple")).unwrap();
        favs.delete("MSFT").unwrap();
        let symbols: Vec<String> = favs.list().unwrap().into_iter().map(|s| s.symbol).collect();
        assert_eq!(symbols, vec!["AAPL", "AMZN"]);
    }

    #[test]
    fn list_keeps_stored_kind() {
        let store = Store::open_in_memory().unwrap();
        let favs = Favourites::new(&store);
        let mut etf = stock("SPY", "SPDR S&P 500");
        etf.kind = "etf".into();
        favs.save(&etf).unwrap();
        let got = favs.get("SPY").unwrap().unwrap();
        assert_eq!(got, etf);
    }

    #[test]
    fn toggle_flips_membership() {
        let store = Store::open_in_memory().unwrap();
        let favs = Favourites::new(&store);
        let s = stock("NVDA", "Nvidia");
        assert!(favs.toggle(&s).unwrap());
        assert!(favs.is_favourite("NVDA").unwrap());
        assert!(!favs.toggle(&s).unwrap());
        assert!(!favs.is_favourite("NVDA").unwrap());
    }
}
