// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Stock;

/// Case-insensitive substring match on symbol or name, input order preserved.
/// A blank query matches nothing.
pub fn filter_stocks(stocks: &[Stock], query: &str) -> Vec<Stock> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    stocks
        .iter()
        .filter(|s| {
            s.symbol.to_lowercase().contains(&needle) || s.name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// List view policy: no query shows everything.
pub fn browse(stocks: &[Stock], query: Option<&str>) -> Vec<Stock> {
    match query.map(str::trim) {
        Some(q) if !q.is_empty() => filter_stocks(stocks, q),
        _ => stocks.to_vec(),
    }
}

pub fn only_kind(stocks: Vec<Stock>, kind: &str) -> Vec<Stock> {
    stocks.into_iter().filter(|s| s.is_kind(kind)).collect()
}
