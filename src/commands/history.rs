// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::history::{POPULAR_QUERIES, SearchHistory};
use crate::store::Store;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(store: &Store, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    let history = SearchHistory::with_limit(store, cfg.history_limit);
    match m.subcommand() {
        Some(("list", sub)) => {
            let limit = *sub.get_one::<usize>("limit").unwrap_or(&history.limit());
            let data = history
                .entries(limit)?
                .into_iter()
                .map(|e| {
                    vec![
                        e.query,
                        e.timestamp
                            .with_timezone(&chrono::Local)
                            .format("%Y-%m-%d %H:%M")
                            .to_string(),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Query", "Searched"], data));
        }
        Some(("clear", _)) => {
            let removed = history.clear()?;
            println!("Cleared {} search(es)", removed);
        }
        Some(("popular", _)) => {
            let data = POPULAR_QUERIES.iter().map(|q| vec![q.to_string()]).collect();
            println!("{}", pretty_table(&["Popular requests"], data));
        }
        _ => {}
    }
    Ok(())
}
