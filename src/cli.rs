// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print as JSON")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn month_arg() -> Arg {
    Arg::new("month").long("month").help("YYYY-MM, defaults to the current month")
}

fn window_arg() -> Arg {
    Arg::new("window")
        .long("window")
        .default_value("week")
        .value_parser(["week", "month", "all"])
}

pub fn build_cli() -> Command {
    Command::new("tally")
        .about("Income/expense tracker with monthly budgets and live reports")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Database file, overrides TALLY_DB"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Replace fields of a saved transaction")
                        .arg(id_arg())
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(
                    Command::new("list")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("all")
                                .value_parser(["all", "income", "expense"]),
                        )
                        .arg(Arg::new("search").long("search").default_value(""))
                        .arg(
                            Arg::new("window")
                                .long("window")
                                .default_value("all")
                                .value_parser(["week", "month", "all"]),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(json_flag()),
                )
                .subcommand(Command::new("clear").about("Delete every transaction")),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly category budgets")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(month_arg())
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64))
                                .help("Replace the budget with this id"),
                        ),
                )
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(Command::new("list").arg(month_arg()).arg(json_flag()))
                .subcommand(Command::new("clear").about("Delete every budget"))
                .subcommand(
                    Command::new("categories")
                        .about("Expense categories without a budget this month")
                        .arg(month_arg()),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Reports")
                .subcommand(Command::new("balances").arg(json_flag()))
                .subcommand(Command::new("summary").arg(window_arg()).arg(json_flag()))
                .subcommand(
                    Command::new("categories")
                        .arg(window_arg())
                        .arg(
                            Arg::new("top")
                                .long("top")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(json_flag()),
                ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("user")
                .about("Accounts and session")
                .subcommand(
                    Command::new("register")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(
                    Command::new("login")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("logout"))
                .subcommand(Command::new("whoami")),
        )
}
