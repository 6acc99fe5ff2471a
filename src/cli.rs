// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("billfold")
        .version(crate_version!())
        .about("Credit-card bill, installment, and one-time-bill tracker with encrypted backup and cloud sync")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("profile")
                .about("Manage profiles")
                .subcommand(
                    Command::new("add")
                        .about("Add a profile")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List profiles")))
                .subcommand(
                    Command::new("use")
                        .about("Set the active profile")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a profile and everything it owns")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .action(ArgAction::SetTrue)
                                .help("Confirm the cascade deletion"),
                        ),
                ),
        )
        .subcommand(
            Command::new("card")
                .about("Manage credit cards")
                .subcommand(
                    Command::new("add")
                        .about("Add a card to a profile")
                        .arg(Arg::new("profile").long("profile").help("Profile name (defaults to active)"))
                        .arg(Arg::new("bank").long("bank").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("due-day").long("due-day").required(true))
                        .arg(Arg::new("cutoff-day").long("cutoff-day").required(true))
                        .arg(Arg::new("color").long("color").default_value("#4f6df5")),
                )
                .subcommand(json_flags(Command::new("list").about("List cards")))
                .subcommand(
                    Command::new("transfer")
                        .about("Move a card to another profile")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("to-profile").long("to-profile").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a card and its statements/installments/bills")
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("statement")
                .about("Manage monthly card statements")
                .subcommand(
                    Command::new("set")
                        .about("Set (insert or update) the statement for a card and month")
                        .arg(Arg::new("card").long("card").required(true))
                        .arg(Arg::new("month").long("month").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("unbilled")
                                .long("unbilled")
                                .action(ArgAction::SetTrue)
                                .help("Mark the amount as not yet billed"),
                        )
                        .arg(Arg::new("due-date").long("due-date").help("Override due date (YYYY-MM-DD)"))
                        .arg(Arg::new("adjusted").long("adjusted").help("Adjusted amount after disputes")),
                )
                .subcommand(
                    Command::new("pay")
                        .about("Mark a statement paid")
                        .arg(Arg::new("card").long("card").required(true))
                        .arg(Arg::new("month").long("month").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List statements")
                        .arg(Arg::new("month").long("month"))
                        .arg(Arg::new("card").long("card")),
                )),
        )
        .subcommand(
            Command::new("installment")
                .about("Manage card installment plans")
                .subcommand(
                    Command::new("add")
                        .about("Add an installment plan")
                        .arg(Arg::new("card").long("card").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("principal").long("principal").required(true))
                        .arg(Arg::new("terms").long("terms").required(true))
                        .arg(Arg::new("start").long("start").required(true).help("Start date YYYY-MM-DD")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List installment plans")
                        .arg(Arg::new("month").long("month").help("Only plans active in this month")),
                )),
        )
        .subcommand(
            Command::new("cash")
                .about("Manage cash installments")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("card").long("card").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("monthly").long("monthly").required(true))
                        .arg(Arg::new("terms").long("terms").required(true))
                        .arg(Arg::new("start").long("start").required(true)),
                )
                .subcommand(
                    Command::new("pay")
                        .arg(Arg::new("card").long("card").required(true))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("bill")
                .about("Manage one-time bills")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("card").long("card").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("month").long("month").required(true)),
                )
                .subcommand(
                    Command::new("pay")
                        .arg(Arg::new("card").long("card").required(true))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(Arg::new("month").long("month")),
                )),
        )
        .subcommand(
            Command::new("balance")
                .about("Track end-of-month bank balances per profile")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("profile").long("profile").help("Profile name (defaults to active)"))
                        .arg(Arg::new("month").long("month").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("export")
                .about("Export data to csv/json")
                .subcommand(
                    Command::new("statements")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("backup")
                .about("Full-dataset backup, restore, and merge")
                .subcommand(
                    Command::new("export")
                        .about("Write a snapshot of the whole dataset")
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(Arg::new("password").long("password").help("Encrypt with this password")),
                )
                .subcommand(
                    Command::new("import")
                        .about("Restore: replace local state with a snapshot file")
                        .arg(Arg::new("path").long("path").required(true))
                        .arg(Arg::new("password").long("password")),
                )
                .subcommand(
                    Command::new("merge")
                        .about("Merge a snapshot file into local state (additive only)")
                        .arg(Arg::new("path").long("path").required(true))
                        .arg(Arg::new("password").long("password")),
                )
                .subcommand(
                    Command::new("export-profile")
                        .about("Write a single-profile backup")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("import-profile")
                        .about("Import a single-profile backup under fresh ids")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("sync")
                .about("Sync the dataset against a remote object store")
                .subcommand(
                    Command::new("now")
                        .about("Run one last-writer-wins sync cycle")
                        .arg(Arg::new("url").long("url").required(true).help("Base URL of the object store"))
                        .arg(Arg::new("token").long("token").help("Bearer token"))
                        .arg(Arg::new("password").long("password").help("Encrypt uploads / decrypt downloads")),
                ),
        )
        .subcommand(Command::new("doctor").about("Check referential integrity of the dataset"))
}
