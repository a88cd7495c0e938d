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
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .default_value("all")
        .help("all | this-month | this-year | YYYY | YYYY-MM")
}

pub fn build_cli() -> Command {
    Command::new("kassenbuch")
        .version(clap::crate_version!())
        .about("Income and expense tracking with monthly reports and spreadsheet export")
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .value_name("FILE")
                .help("JSON records file (defaults to the built-in sample data)"),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .global(true)
                .value_name("YYYY-MM-DD")
                .help("Reference date for relative periods and file names"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .help("Settings file (defaults to the platform config dir)"),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated reports")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("monthly")
                        .about("Income, expenses and balance per month, newest first")
                        .arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("categories")
                        .about("Amounts and shares per category")
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("yearly")
                        .about("Totals for one calendar year")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32))
                                .help("Defaults to the current year"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("series")
                        .about("January to December of one year, empty months included")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32))
                                .help("Defaults to the current year"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("stats").about("Current month, year to date and overall totals"),
                )),
        )
        .subcommand(
            Command::new("list")
                .about("List entries")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("income").arg(period_arg())))
                .subcommand(json_flags(Command::new("expenses").arg(period_arg()))),
        )
        .subcommand(
            Command::new("export")
                .about("Write a spreadsheet")
                .subcommand_required(true)
                .subcommand(export_args(Command::new("income")))
                .subcommand(export_args(Command::new("expenses")))
                .subcommand(export_args(
                    Command::new("summary").about("Monthly overview with a GESAMT row"),
                )),
        )
}

fn export_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("format")
            .long("format")
            .help("xlsx | csv (defaults to the configured format, else xlsx)"),
    )
    .arg(Arg::new("out").long("out").value_name("PATH"))
    .arg(Arg::new("sheet").long("sheet").value_name("NAME"))
}
