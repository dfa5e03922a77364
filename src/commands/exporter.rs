// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::favourites::Favourites;
use crate::store::Store;
use anyhow::{Context, Result, bail};
use std::path::Path;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("favourites", sub)) => {
            let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
            let out = Path::new(sub.get_one::<String>("out").unwrap().trim());
            let n = export_favourites(store, &fmt, out)?;
            println!("Exported {} favourite(s) to {}", n, out.display());
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn export_favourites(store: &Store, fmt: &str, out: &Path) -> Result<usize> {
    let favs = Favourites::new(store).list()?;
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Cannot write {}", out.display()))?;
            wtr.write_record([
                "symbol",
                "name",
                "price",
                "change",
                "changePercent",
                "logo",
                "type",
            ])?;
            for s in &favs {
                wtr.write_record([
                    s.symbol.clone(),
                    s.name.clone(),
                    s.price.to_string(),
                    s.change.to_string(),
                    s.change_percent.to_string(),
                    s.logo.clone(),
                    s.kind.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        // same shape the catalog serves, so an export can be re-read as a catalog
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&favs)?)
                .with_context(|| format!("Cannot write {}", out.display()))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(favs.len())
}
