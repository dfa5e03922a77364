// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use stockshelf::catalog::{HttpCatalog, StockCatalog};
use stockshelf::config::{Config, resolve_db_path};
use stockshelf::store::{Location, Store};
use stockshelf::{cli, commands};

fn init_logging(verbose: bool) {
    let default = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_logging(matches.get_flag("verbose"));

    let path = resolve_db_path(matches.get_one::<String>("db").map(|s| s.as_str()))?;
    let store = Store::open_or_ephemeral(&path)
        .with_context(|| format!("Open store at {}", path.display()))?;

    let mut cfg = Config::load(&store)?;
    if let Some(url) = matches.get_one::<String>("catalog_url") {
        cfg.catalog_url = url.trim().to_string();
    }
    let catalog: Arc<dyn StockCatalog> = Arc::new(HttpCatalog::new(cfg.catalog_url.clone())?);

    match matches.subcommand() {
        Some(("init", _)) => match store.location() {
            Location::Disk(p) => println!("Store initialized at {}", p.display()),
            Location::Memory => println!("Could not create {}; using a temporary store", path.display()),
        },
        Some(("stocks", sub)) => commands::stocks::handle(&store, &catalog, sub)?,
        Some(("search", sub)) => commands::search::handle(&store, &cfg, catalog.as_ref(), sub)?,
        Some(("fav", sub)) => commands::favourites::handle(&store, catalog.as_ref(), sub)?,
        Some(("history", sub)) => commands::history::handle(&store, &cfg, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("config", sub)) => commands::config::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store, &cfg)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
