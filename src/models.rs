// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A quoted instrument as served by the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub logo: String,
    #[serde(
        rename = "type",
        default = "default_kind",
        deserialize_with = "kind_or_default"
    )]
    pub kind: String,
}

impl Stock {
    pub const DEFAULT_KIND: &'static str = "stock";

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

fn default_kind() -> String {
    Stock::DEFAULT_KIND.to_string()
}

fn kind_or_default<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    // any non-string value falls back to the default instead of failing the payload
    let v: Option<serde_json::Value> = Option::deserialize(d)?;
    Ok(normalize_kind(v.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })))
}

/// Shared defaulting rule for every path that rebuilds a `Stock`.
pub fn normalize_kind(kind: Option<String>) -> String {
    match kind {
        Some(k) if !k.trim().is_empty() => k,
        _ => default_kind(),
    }
}

/// Persisted favourite; one row per symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavouriteStock {
    pub symbol: String,
    pub name: Option<String>,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub logo: Option<String>,
    pub kind: Option<String>,
}

impl From<&Stock> for FavouriteStock {
    fn from(s: &Stock) -> Self {
        Self {
            symbol: s.symbol.clone(),
            name: Some(s.name.clone()),
            price: s.price,
            change: s.change,
            change_percent: s.change_percent,
            logo: Some(s.logo.clone()),
            kind: Some(s.kind.clone()),
        }
    }
}

impl From<FavouriteStock> for Stock {
    fn from(f: FavouriteStock) -> Self {
        Self {
            symbol: f.symbol,
            name: f.name.unwrap_or_default(),
            price: f.price,
            change: f.change,
            change_percent: f.change_percent,
            logo: f.logo.unwrap_or_default(),
            kind: normalize_kind(f.kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub query: String,
    pub timestamp: DateTime<Utc>,
}
