// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreError;
use crate::models::SearchHistoryEntry;
use crate::store::{Store, history_records};
use chrono::Utc;
use tracing::{debug, info};

pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Curated queries offered next to the user's own history.
pub const POPULAR_QUERIES: &[&str] = &[
    "Apple",
    "Tesla",
    "Amazon",
    "Microsoft",
    "Google",
    "First Solar",
    "Alibaba",
    "Facebook",
    "Mastercard",
    "Cisco",
    "Nvidia",
    "Nokia",
    "Yandex",
    "GM",
];

/// Recent search queries, one row per distinct query, capped at `limit`.
pub struct SearchHistory<'a> {
    store: &'a Store,
    limit: usize,
}

impl<'a> SearchHistory<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self::with_limit(store, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(store: &'a Store, limit: usize) -> Self {
        Self { store, limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Records `query` as the most recent search. Whitespace-only queries are
    /// ignored. Returns whether anything was recorded.
    pub fn save(&self, query: &str) -> Result<bool, StoreError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        self.store.write(|tx| {
            let now = Utc::now().timestamp_micros();
            // keep timestamps strictly increasing so recency order never ties
            let stamp = match history_records::newest_micros(tx)? {
                Some(newest) if newest >= now => newest + 1,
                _ => now,
            };
            if history_records::touch(tx, trimmed, stamp)? == 0 {
                history_records::insert(tx, trimmed, stamp)?;
            }
            Ok(())
        })?;
        debug!(query = trimmed, "recorded search");

        self.enforce_limit()?;
        Ok(true)
    }

    fn enforce_limit(&self) -> Result<usize, StoreError> {
        let count = self.store.read(history_records::count)?;
        if count as usize <= self.limit {
            return Ok(0);
        }
        let limit = self.limit;
        let evicted = self
            .store
            .write(|tx| history_records::delete_beyond(tx, limit))?;
        info!(evicted, limit, "trimmed search history");
        Ok(evicted)
    }

    /// Query strings, most recent first, at most `limit` of them.
    pub fn recent(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        Ok(self
            .entries(limit)?
            .into_iter()
            .map(|e| e.query)
            .collect())
    }

    pub fn entries(&self, limit: usize) -> Result<Vec<SearchHistoryEntry>, StoreError> {
        self.store
            .read(|c| history_records::query_recent(c, Some(limit)))
    }

    /// Removes every entry; returns how many were removed.
    pub fn clear(&self) -> Result<usize, StoreError> {
        let removed = self.store.write(|tx| history_records::delete_all(tx))?;
        info!(removed, "cleared search history");
        Ok(removed)
    }
}
