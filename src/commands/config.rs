// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{get_setting, list_settings, set_setting};
use crate::store::Store;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => {
            let data = list_settings(store)?
                .into_iter()
                .map(|(k, v)| vec![k, v])
                .collect();
            println!("{}", pretty_table(&["Key", "Value"], data));
        }
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            match get_setting(store, key)? {
                Some(v) => println!("{}", v),
                None => println!("{} is not set", key),
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap();
            set_setting(store, key, value)?;
            println!("{} set to {}", key, value.trim());
        }
        _ => {}
    }
    Ok(())
}
