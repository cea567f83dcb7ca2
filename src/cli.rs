// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .default_value("default")
        .help("User the transactions belong to")
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON Lines"),
    ]
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .required(true)
        .value_parser(value_parser!(u32).range(1..=12))
        .help("Calendar month (1-12)")
}

fn year_arg() -> Arg {
    Arg::new("year")
        .long("year")
        .required(true)
        .value_parser(value_parser!(i32))
        .help("Calendar year")
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["expense", "income"])
        .help("Transaction side")
}

pub fn build_cli() -> Command {
    Command::new("centavo")
        .about("Personal finance tracker: record transactions, summarize months, chart history")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("color").long("color").required(true).help("Display color, e.g. #FF6B6B"))
                        .arg(type_arg().required(true)),
                )
                .subcommand(
                    Command::new("list")
                        .about("List categories")
                        .arg(type_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(type_arg().required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(user_arg())
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true).help("Positive decimal"))
                        .arg(type_arg().required(true))
                        .arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(
                    Command::new("list")
                        .about("List transactions")
                        .arg(user_arg())
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(type_arg())
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a transaction")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated views")
                .subcommand(
                    Command::new("summary")
                        .about("Monthly totals, balance and per-category breakdown")
                        .arg(user_arg())
                        .arg(month_arg())
                        .arg(year_arg())
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("history")
                        .about("Income/expense totals per month over a sliding window")
                        .arg(user_arg())
                        .arg(month_arg())
                        .arg(year_arg())
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .default_value("6")
                                .value_parser(clap::builder::RangedU64ValueParser::<usize>::new().range(1..=12))
                                .help("Window size in months ending at the target month"),
                        )
                        .args(json_args()),
                ),
        )
}
