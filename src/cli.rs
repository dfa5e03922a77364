// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command, value_parser};

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as a pretty JSON array"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn symbol_arg() -> Arg {
    Arg::new("symbol").required(true).help("Ticker symbol, e.g. AAPL")
}

pub fn build_cli() -> Command {
    command!()
        .about("Browse a stock catalog, keep favourites and search history")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the store (defaults to STOCKSHELF_DB or the platform data dir)"),
        )
        .arg(
            Arg::new("catalog_url")
                .long("catalog-url")
                .global(true)
                .help("Override the catalog endpoint for this run"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(Command::new("init").about("Create the local store"))
        .subcommand(
            Command::new("stocks")
                .about("Browse the remote catalog")
                .subcommand(output_flags(
                    Command::new("list").about("List every stock").arg(
                        Arg::new("search")
                            .long("search")
                            .help("Only show stocks whose symbol or name contains this"),
                    ),
                )),
        )
        .subcommand(output_flags(
            Command::new("search")
                .about("Search the catalog and record the query in history")
                .arg(Arg::new("query").required(true).num_args(1..))
                .arg(
                    Arg::new("all_types")
                        .long("all-types")
                        .action(ArgAction::SetTrue)
                        .help("Include non-stock instruments"),
                ),
        ))
        .subcommand(
            Command::new("fav")
                .about("Manage favourites")
                .subcommand(Command::new("add").arg(symbol_arg()))
                .subcommand(Command::new("rm").arg(symbol_arg()))
                .subcommand(Command::new("toggle").arg(symbol_arg()))
                .subcommand(Command::new("check").arg(symbol_arg()))
                .subcommand(output_flags(
                    Command::new("list").arg(Arg::new("search").long("search")),
                )),
        )
        .subcommand(
            Command::new("history")
                .about("Recent and popular searches")
                .subcommand(
                    Command::new("list").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                )
                .subcommand(Command::new("clear"))
                .subcommand(Command::new("popular")),
        )
        .subcommand(
            Command::new("export")
                .about("Export data to a file")
                .subcommand(
                    Command::new("favourites")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Read and write settings")
                .subcommand(Command::new("list"))
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the local store for problems"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn search_joins_words() {
        let m = build_cli().get_matches_from(["stockshelf", "search", "first", "solar"]);
        let (_, sub) = m.subcommand().unwrap();
        let words: Vec<&String> = sub.get_many::<String>("query").unwrap().collect();
        assert_eq!(words, ["first", "solar"]);
    }
}
