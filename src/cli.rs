// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and manage deals")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record a deal; prices are typed in thousands (12 = 12,000)")
                .arg(Arg::new("original").long("original").short('o').required(true))
                .arg(Arg::new("selling").long("selling").short('s').required(true))
                .arg(Arg::new("note").long("note").short('n'))
                .arg(
                    Arg::new("at")
                        .long("at")
                        .help("Back-date the deal (RFC 3339 or 'YYYY-MM-DD HH:MM' local)"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List deals, newest first")
                .arg(Arg::new("date").long("date").help("Only deals on this local day (YYYY-MM-DD)"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .value_parser(value_parser!(usize))
                        .requires("limit")
                        .help("1-based page of --limit deals"),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Change a deal; profit is recomputed")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("original").long("original").short('o'))
                .arg(Arg::new("selling").long("selling").short('s'))
                .arg(Arg::new("note").long("note").short('n'))
                .arg(
                    Arg::new("clear-note")
                        .long("clear-note")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("note"),
                ),
        )
        .subcommand(
            Command::new("rm").about("Delete one deal").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
        .subcommand(
            Command::new("purge")
                .about("Delete every deal of a day, or of one minute of that day")
                .arg(Arg::new("date").long("date").required(true))
                .arg(Arg::new("time").long("time").help("HH:MM")),
        )
}

fn stats_cmd() -> Command {
    Command::new("stats")
        .about("Profit statistics")
        .subcommand_required(true)
        .subcommand(json_flags(
            Command::new("summary").about("Totals, averages, streak and last-month profit"),
        ))
        .subcommand(json_flags(
            Command::new("periods")
                .about("Deal count and profit per day, month or year")
                .arg(
                    Arg::new("by")
                        .long("by")
                        .default_value("month")
                        .value_parser(["day", "month", "year"]),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(json_flags(
            Command::new("chart").about("Profit per deal in chronological order"),
        ))
}

pub fn build_cli() -> Command {
    Command::new("profitsplit")
        .version(clap::crate_version!())
        .about("Record deals, split the profit between two partners, earn levels and badges")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(tx_cmd())
        .subcommand(Command::new("reset").about("Start a new accounting period for the party totals"))
        .subcommand(json_flags(
            Command::new("totals").about("What each partner is owed this period"),
        ))
        .subcommand(stats_cmd())
        .subcommand(json_flags(
            Command::new("badges").about("Level, experience and achievement badges"),
        ))
        .subcommand(
            Command::new("suggest")
                .about("Show the amounts a typed price could mean")
                .arg(Arg::new("value").required(true)),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Party names and preferences")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("theme")
                .about("Light/dark preference")
                .subcommand_required(true)
                .subcommand(Command::new("show"))
                .subcommand(Command::new("toggle")),
        )
        .subcommand(
            Command::new("watch")
                .about("Redraw the dashboard whenever the database changes")
                .arg(
                    Arg::new("interval-ms")
                        .long("interval-ms")
                        .default_value("1000")
                        .value_parser(value_parser!(u64)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored deals for broken invariants"))
}
