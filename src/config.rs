// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::DEFAULT_CATALOG_URL;
use crate::db;
use crate::error::StoreError;
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::store::{Store, settings_records};
use anyhow::Result;
use serde::Serialize;
use std::env;
use std::path::PathBuf;

pub const DB_ENV: &str = "STOCKSHELF_DB";
pub const CATALOG_URL_ENV: &str = "STOCKSHELF_CATALOG_URL";

pub const KEY_CATALOG_URL: &str = "catalog_url";
pub const KEY_HISTORY_LIMIT: &str = "history_limit";
pub const KNOWN_KEYS: &[&str] = &[KEY_CATALOG_URL, KEY_HISTORY_LIMIT];

/// Store location: `--db` flag, then `STOCKSHELF_DB`, then the platform data dir.
pub fn resolve_db_path(flag: Option<&str>) -> Result<PathBuf> {
    if let Some(p) = non_blank(flag.map(str::to_string)) {
        return Ok(PathBuf::from(p));
    }
    if let Some(p) = non_blank(env::var(DB_ENV).ok()) {
        return Ok(PathBuf::from(p));
    }
    db::default_db_path()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub catalog_url: String,
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Config {
    /// Environment first, then the settings table, then defaults.
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        Self::load_with(store, env::var(CATALOG_URL_ENV).ok())
    }

    pub fn load_with(store: &Store, env_catalog_url: Option<String>) -> Result<Self, StoreError> {
        let defaults = Self::default();
        let stored_url = non_blank(get_setting(store, KEY_CATALOG_URL)?);
        let catalog_url = non_blank(env_catalog_url)
            .or(stored_url)
            .unwrap_or(defaults.catalog_url);
        let history_limit = match get_setting(store, KEY_HISTORY_LIMIT)? {
            Some(raw) => parse_history_limit(&raw)?,
            None => defaults.history_limit,
        };
        Ok(Self {
            catalog_url,
            history_limit,
        })
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub fn parse_history_limit(raw: &str) -> Result<usize, StoreError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(StoreError::InvalidSetting {
            key: KEY_HISTORY_LIMIT.to_string(),
            reason: format!("expected a positive integer, got '{}'", raw.trim()),
        }),
    }
}

pub fn get_setting(store: &Store, key: &str) -> Result<Option<String>, StoreError> {
    store.read(|c| settings_records::get(c, key))
}

pub fn set_setting(store: &Store, key: &str, value: &str) -> Result<(), StoreError> {
    let value = value.trim();
    match key {
        KEY_CATALOG_URL => {
            if value.is_empty() {
                return Err(StoreError::InvalidSetting {
                    key: key.to_string(),
                    reason: "URL must not be empty".to_string(),
                });
            }
        }
        KEY_HISTORY_LIMIT => {
            parse_history_limit(value)?;
        }
        other => {
            return Err(StoreError::InvalidSetting {
                key: other.to_string(),
                reason: format!("unknown key (known: {})", KNOWN_KEYS.join(", ")),
            });
        }
    }
    store.write(|tx| settings_records::set(tx, key, value))?;
    Ok(())
}

pub fn list_settings(store: &Store) -> Result<Vec<(String, String)>, StoreError> {
    store.read(settings_records::all)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let store = Store::open_in_memory().unwrap();
        let cfg = Config::load_with(&store, None).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn env_beats_stored_setting() {
        let store = Store::open_in_memory().unwrap();
        set_setting(&store, KEY_CATALOG_URL, "http://stored/stocks.json").unwrap();
        let cfg = Config::load_with(&store, None).unwrap();
        assert_eq!(cfg.catalog_url, "http://stored/stocks.json");
        let cfg = Config::load_with(&store, Some("http://env/stocks.json".into())).unwrap();
        assert_eq!(cfg.catalog_url, "http://env/stocks.json");
        let cfg = Config::load_with(&store, Some("  ".into())).unwrap();
        assert_eq!(cfg.catalog_url, "http://stored/stocks.json");
    }

    #[test]
    fn history_limit_must_be_positive() {
        let store = Store::open_in_memory().unwrap();
        assert!(set_setting(&store, KEY_HISTORY_LIMIT, "0").is_err());
        assert!(set_setting(&store, KEY_HISTORY_LIMIT, "ten").is_err());
        set_setting(&store, KEY_HISTORY_LIMIT, " 5 ").unwrap();
        assert_eq!(Config::load_with(&store, None).unwrap().history_limit, 5);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        let err = set_setting(&store, "colour", "blue").unwrap_err();
        assert!(err.to_string().contains("unknown key"));
        assert!(list_settings(&store).unwrap().is_empty());
    }
}
