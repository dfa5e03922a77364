// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Remote stock catalog.
//!
//! The catalog is a single JSON array served over HTTP. [`HttpCatalog`] fetches
//! and decodes it; [`CatalogFeed`] keeps the most recent list and uses a
//! ticket per fetch so that a response which arrives late cannot replace a
//! list obtained by a later fetch.

use crate::error::CatalogError;
use crate::models::Stock;
use crate::utils::http_client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

pub const DEFAULT_CATALOG_URL: &str = "https://mustdev.ru/api/stocks.json";

pub trait StockCatalog: Send + Sync {
    fn fetch_stocks(&self) -> Result<Vec<Stock>, CatalogError>;
}

pub struct HttpCatalog {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>) -> Result<Self, CatalogError> {
        Ok(Self {
            client: http_client()?,
            url: url.into(),
        })
    }

    pub fn with_client(client: reqwest::blocking::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl StockCatalog for HttpCatalog {
    fn fetch_stocks(&self) -> Result<Vec<Stock>, CatalogError> {
        debug!(url = %self.url, "fetching catalog");
        let resp = self.client.get(&self.url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        let body = resp.bytes()?;
        let stocks = decode_stocks(&body)?;
        info!(count = stocks.len(), "fetched catalog");
        Ok(stocks)
    }
}

pub fn decode_stocks(body: &[u8]) -> Result<Vec<Stock>, CatalogError> {
    serde_json::from_slice(body).map_err(|err| {
        warn!(error = %err, "catalog payload rejected");
        CatalogError::Decode(err)
    })
}

/// Exact ticker lookup, ignoring ASCII case.
pub fn find_by_symbol<'a>(stocks: &'a [Stock], symbol: &str) -> Option<&'a Stock> {
    let symbol = symbol.trim();
    stocks.iter().find(|s| s.symbol.eq_ignore_ascii_case(symbol))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Default)]
struct Snapshot {
    ticket: u64,
    stocks: Option<Vec<Stock>>,
}

/// Latest accepted catalog list. A response is applied only if its ticket is
/// newer than the one that produced the current list.
#[derive(Default)]
pub struct CatalogFeed {
    issued: AtomicU64,
    current: Mutex<Snapshot>,
}

impl CatalogFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns whether `stocks` became the current list.
    pub fn complete(&self, ticket: FetchTicket, stocks: Vec<Stock>) -> bool {
        let mut snap = self.current.lock().unwrap_or_else(|p| p.into_inner());
        if ticket.0 <= snap.ticket {
            warn!(
                ticket = ticket.0,
                current = snap.ticket,
                "discarding stale catalog response"
            );
            return false;
        }
        snap.ticket = ticket.0;
        snap.stocks = Some(stocks);
        true
    }

    pub fn stocks(&self) -> Option<Vec<Stock>> {
        let snap = self.current.lock().unwrap_or_else(|p| p.into_inner());
        snap.stocks.clone()
    }

    pub fn refresh(&self, catalog: &dyn StockCatalog) -> Result<bool, CatalogError> {
        let ticket = self.begin();
        let stocks = catalog.fetch_stocks()?;
        Ok(self.complete(ticket, stocks))
    }

    /// Fetches on a separate thread; the handle yields whether the result was applied.
    pub fn refresh_in_background(
        self: &Arc<Self>,
        catalog: Arc<dyn StockCatalog>,
    ) -> JoinHandle<Result<bool, CatalogError>> {
        let feed = Arc::clone(self);
        let ticket = feed.begin();
        thread::spawn(move || {
            let stocks = catalog.fetch_stocks()?;
            Ok(feed.complete(ticket, stocks))
        })
    }
}
