// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the local record store and the repositories on top of it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open store at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Schema migration to version {version} failed: {source}")]
    Migrate {
        version: i64,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Store query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Commit failed: {0}")]
    Commit(#[source] rusqlite::Error),

    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("Persistence worker has shut down")]
    WorkerGone,
}

/// Errors raised while fetching or decoding the remote stock catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog at {url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("Catalog payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
